use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use search_pipeline::{search_articles, ScoredArticle};

use crate::{api_state::ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    100
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub documents: Vec<ScoredArticle>,
    #[serde(rename = "chunkHits")]
    pub chunk_hits: usize,
    #[serde(rename = "unresolvedChunks")]
    pub unresolved_chunks: usize,
    pub error: Option<String>,
}

pub async fn search_handler(
    State(state): State<ApiState>,
    Json(request): Json<SearchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    match search_articles(
        &state.db,
        &state.embedder,
        &request.query,
        request.limit,
        &state.search_tuning,
    )
    .await
    {
        Ok(results) => Ok(Json(SearchResponse {
            documents: results.articles,
            chunk_hits: results.chunk_hits,
            unresolved_chunks: results.unresolved_chunks,
            error: None,
        })
        .into_response()),
        // Dependency trouble degrades to an empty result list plus the
        // reason; the caller owns retry/backoff policy.
        Err(err) if err.is_retryable() => {
            warn!(stage = ?err.failed_stage(), "Search degraded to empty result: {err}");
            Ok((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(SearchResponse {
                    documents: Vec::new(),
                    chunk_hits: 0,
                    unresolved_chunks: 0,
                    error: Some(err.to_string()),
                }),
            )
                .into_response())
        }
        Err(err) => Err(ApiError::from(err)),
    }
}
