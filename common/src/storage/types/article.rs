use std::collections::HashMap;

use crate::storage::types::serde_helpers::{deserialize_datetime, serialize_datetime};
use crate::{error::AppError, storage::db::SurrealDbClient, stored_object};
use surrealdb::sql::Thing;
use uuid::Uuid;

stored_object!(Article, "article", {
    title: String,
    #[serde(rename = "abstract")]
    abstract_text: String,
    authors: Vec<String>,
    author_count: u32,
    #[serde(serialize_with = "serialize_datetime", deserialize_with = "deserialize_datetime", default)]
    published_at: DateTime<Utc>,
    sections: HashMap<String, String>,
    ai_summary: Option<String>
});

impl Article {
    pub fn new(
        title: String,
        abstract_text: String,
        authors: Vec<String>,
        published_at: DateTime<Utc>,
        sections: HashMap<String, String>,
    ) -> Self {
        let now = Utc::now();
        let author_count = authors.len() as u32;
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            title,
            abstract_text,
            authors,
            author_count,
            published_at,
            sections,
            ai_summary: None,
        }
    }

    /// Fetch articles by id, preserving the requested order. Unknown ids are
    /// silently dropped so an entity click with stale attributions still
    /// resolves the rest.
    pub async fn find_by_ids(
        db_client: &SurrealDbClient,
        ids: &[String],
    ) -> Result<Vec<Article>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let thing_ids: Vec<Thing> = ids
            .iter()
            .map(|id| Thing::from((Self::table_name(), id.as_str())))
            .collect();

        let mut response = db_client
            .query("SELECT * FROM type::table($table) WHERE id IN $things")
            .bind(("table", Self::table_name().to_owned()))
            .bind(("things", thing_ids))
            .await?;

        let articles: Vec<Article> = response.take(0)?;

        let mut by_id: HashMap<String, Article> = articles
            .into_iter()
            .map(|article| (article.id.clone(), article))
            .collect();

        let mut ordered = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(article) = by_id.remove(id) {
                ordered.push(article);
            }
        }

        Ok(ordered)
    }

    /// Most recently published articles, the suggested-reading fallback when
    /// there is no query to search with.
    pub async fn find_recent(
        db_client: &SurrealDbClient,
        limit: usize,
    ) -> Result<Vec<Article>, AppError> {
        let mut response = db_client
            .query("SELECT * FROM type::table($table) ORDER BY published_at DESC LIMIT $limit")
            .bind(("table", Self::table_name().to_owned()))
            .bind(("limit", limit as i64))
            .await?;

        let articles: Vec<Article> = response.take(0)?;
        Ok(articles)
    }

    /// Cache a generated summary on the article record. Generation happens
    /// elsewhere; this is only the write-back.
    pub async fn store_summary(
        db_client: &SurrealDbClient,
        id: &str,
        summary: &str,
    ) -> Result<(), AppError> {
        db_client
            .query(
                "UPDATE type::thing($table, $id)
                SET ai_summary = $summary,
                    updated_at = time::now()",
            )
            .bind(("table", Self::table_name().to_owned()))
            .bind(("id", id.to_owned()))
            .bind(("summary", summary.to_owned()))
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_article(title: &str, year: i32) -> Article {
        Article::new(
            title.to_string(),
            format!("Abstract for {title}"),
            vec!["Doe J".to_string(), "Roe R".to_string()],
            Utc.with_ymd_and_hms(year, 3, 14, 12, 0, 0).unwrap(),
            HashMap::from([(
                "Conclusions".to_string(),
                "Microgravity alters bone density.".to_string(),
            )]),
        )
    }

    #[tokio::test]
    async fn test_article_creation_derives_author_count() {
        let article = sample_article("Bone loss in orbit", 2019);

        assert_eq!(article.author_count, 2);
        assert!(article.ai_summary.is_none());
        assert!(!article.id.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_ids_preserves_order_and_drops_unknown() {
        let namespace = "article_test_ns";
        let database = &Uuid::new_v4().to_string();
        let db = SurrealDbClient::memory(namespace, database)
            .await
            .expect("Failed to start in-memory surrealdb");

        let first = sample_article("First", 2018);
        let second = sample_article("Second", 2020);
        db.store_item(first.clone())
            .await
            .expect("Failed to store first");
        db.store_item(second.clone())
            .await
            .expect("Failed to store second");

        let requested = vec![
            second.id.clone(),
            "missing-id".to_string(),
            first.id.clone(),
        ];
        let found = Article::find_by_ids(&db, &requested)
            .await
            .expect("Lookup failed");

        let titles: Vec<&str> = found.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn test_find_recent_orders_by_publication_date() {
        let namespace = "article_test_ns";
        let database = &Uuid::new_v4().to_string();
        let db = SurrealDbClient::memory(namespace, database)
            .await
            .expect("Failed to start in-memory surrealdb");

        for (title, year) in [("Oldest", 2010), ("Newest", 2023), ("Middle", 2017)] {
            db.store_item(sample_article(title, year))
                .await
                .expect("Failed to store article");
        }

        let recent = Article::find_recent(&db, 2).await.expect("Lookup failed");

        let titles: Vec<&str> = recent.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Newest", "Middle"]);
    }

    #[tokio::test]
    async fn test_store_summary_writes_back() {
        let namespace = "article_test_ns";
        let database = &Uuid::new_v4().to_string();
        let db = SurrealDbClient::memory(namespace, database)
            .await
            .expect("Failed to start in-memory surrealdb");

        let article = sample_article("Summarized", 2021);
        db.store_item(article.clone())
            .await
            .expect("Failed to store article");

        Article::store_summary(&db, &article.id, "Short digest.")
            .await
            .expect("Failed to store summary");

        let fetched = db
            .get_item::<Article>(&article.id)
            .await
            .expect("Failed to fetch")
            .expect("Article should exist");
        assert_eq!(fetched.ai_summary.as_deref(), Some("Short digest."));
    }
}
