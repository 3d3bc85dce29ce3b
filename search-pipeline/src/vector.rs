use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, warn};

use common::{
    error::AppError,
    storage::{db::SurrealDbClient, types::article::Article},
};

use crate::{config::SearchTuning, scoring::distance_to_similarity};

/// One scored chunk as returned by the ANN index, before the article join.
#[derive(Debug, Clone)]
pub struct ChunkHit {
    pub article_id: String,
    pub text: String,
    pub score: f32,
}

/// A chunk hit joined to its parent article.
#[derive(Debug, Clone)]
pub struct JoinedChunk {
    pub article: Article,
    pub score: f32,
}

#[derive(Debug, Deserialize)]
struct KnnRow {
    article_id: String,
    text: String,
    distance: f32,
}

/// KNN query over `article_chunk.embedding`. The index searches a candidate
/// pool of `tuning.candidate_pool(limit)` (the HNSW search width) and returns
/// the best `limit` chunks by distance.
pub async fn find_chunk_hits(
    db_client: &SurrealDbClient,
    query_embedding: &[f32],
    limit: usize,
    tuning: &SearchTuning,
) -> Result<Vec<ChunkHit>, AppError> {
    let candidates = tuning.candidate_pool(limit);

    let knn_query = format!(
        "SELECT article_id, text, vector::distance::knn() AS distance \
         FROM article_chunk \
         WHERE embedding <|{limit},{candidates}|> {query_embedding:?} \
         ORDER BY distance"
    );

    let rows: Vec<KnnRow> = db_client
        .query(knn_query)
        .await
        .map_err(|err| AppError::IndexUnavailable(format!("chunk similarity query failed: {err}")))?
        .take(0)
        .map_err(|err| {
            AppError::IndexUnavailable(format!("chunk similarity result malformed: {err}"))
        })?;

    debug!(
        requested = limit,
        candidates,
        returned = rows.len(),
        "Chunk similarity query completed"
    );

    Ok(rows
        .into_iter()
        .map(|row| ChunkHit {
            article_id: row.article_id,
            text: row.text,
            score: distance_to_similarity(row.distance),
        })
        .collect())
}

/// Resolve each chunk hit to its parent article in one batch fetch. Chunks
/// whose parent cannot be resolved are dropped and counted, never fatal.
pub async fn join_articles(
    db_client: &SurrealDbClient,
    hits: Vec<ChunkHit>,
) -> Result<(Vec<JoinedChunk>, usize), AppError> {
    if hits.is_empty() {
        return Ok((Vec::new(), 0));
    }

    let mut wanted: Vec<String> = Vec::new();
    for hit in &hits {
        if !wanted.contains(&hit.article_id) {
            wanted.push(hit.article_id.clone());
        }
    }

    let articles = Article::find_by_ids(db_client, &wanted)
        .await
        .map_err(|err| AppError::IndexUnavailable(format!("article join query failed: {err}")))?;

    let by_id: HashMap<String, Article> = articles
        .into_iter()
        .map(|article| (article.id.clone(), article))
        .collect();

    let mut joined = Vec::with_capacity(hits.len());
    let mut unresolved = 0usize;
    for hit in hits {
        match by_id.get(&hit.article_id) {
            Some(article) => joined.push(JoinedChunk {
                article: article.clone(),
                score: hit.score,
            }),
            None => unresolved += 1,
        }
    }

    if unresolved > 0 {
        warn!(
            unresolved,
            "Dropped chunks whose parent article could not be resolved"
        );
    }

    Ok((joined, unresolved))
}
