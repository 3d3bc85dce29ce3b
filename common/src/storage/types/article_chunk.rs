use crate::stored_object;
use uuid::Uuid;

stored_object!(ArticleChunk, "article_chunk", {
    article_id: String,
    text: String,
    embedding: Vec<f32>
});

impl ArticleChunk {
    pub fn new(article_id: String, text: String, embedding: Vec<f32>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            article_id,
            text,
            embedding,
        }
    }
}
