pub mod config;
pub mod dedupe;
pub mod scoring;
pub mod vector;

use serde::Serialize;
use tokio::time::timeout;
use tracing::{info, instrument};

use common::{
    error::AppError,
    storage::{db::SurrealDbClient, types::article::Article},
    utils::embedding::EmbeddingProvider,
};

pub use config::SearchTuning;

/// An article paired with its best chunk similarity. Transient: built per
/// request, discarded after the response is sent.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredArticle {
    pub article: Article,
    pub score: f32,
    /// How many chunks of this article matched; kept for observability, not
    /// used in ranking.
    pub chunk_hits: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub articles: Vec<ScoredArticle>,
    /// Chunk candidates returned by the index before deduplication.
    pub chunk_hits: usize,
    /// Chunks dropped because their parent article could not be resolved.
    pub unresolved_chunks: usize,
}

/// Run a semantic article search: embed the query once, fetch the closest
/// chunks from the vector index, join each to its parent article and
/// collapse to one ranked entry per article.
///
/// Input is validated before any external call. Each external call runs
/// under `tuning.external_timeout` and reports a retryable `*Unavailable`
/// condition on expiry; this function never retries on its own.
#[instrument(skip_all)]
pub async fn search_articles(
    db_client: &SurrealDbClient,
    embedder: &EmbeddingProvider,
    query: &str,
    limit: usize,
    tuning: &SearchTuning,
) -> Result<SearchResults, AppError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput("query must not be empty".into()));
    }
    if limit == 0 {
        return Err(AppError::InvalidInput("limit must be positive".into()));
    }
    if limit > tuning.max_limit {
        return Err(AppError::InvalidInput(format!(
            "limit must not exceed {}",
            tuning.max_limit
        )));
    }

    let preview: String = query.chars().take(120).collect();
    info!(limit, preview = %preview.replace('\n', " "), "Starting article search");

    let query_embedding = timeout(tuning.external_timeout, embedder.embed(query))
        .await
        .map_err(|_| AppError::EmbeddingUnavailable("embedding call timed out".into()))??;

    let hits = timeout(
        tuning.external_timeout,
        vector::find_chunk_hits(db_client, &query_embedding, limit, tuning),
    )
    .await
    .map_err(|_| AppError::IndexUnavailable("chunk similarity query timed out".into()))??;

    let chunk_hits = hits.len();

    let (joined, unresolved_chunks) = timeout(
        tuning.external_timeout,
        vector::join_articles(db_client, hits),
    )
    .await
    .map_err(|_| AppError::IndexUnavailable("article join timed out".into()))??;

    let articles = dedupe::dedupe_ranked(joined);

    info!(
        chunk_hits,
        unresolved_chunks,
        distinct_articles = articles.len(),
        "Article search completed"
    );

    Ok(SearchResults {
        articles,
        chunk_hits,
        unresolved_chunks,
    })
}
