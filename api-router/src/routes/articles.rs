use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use common::{error::AppError, storage::types::article::Article};

use crate::{api_state::ApiState, error::ApiError};

const MAX_RECENT_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct ArticlesByIdsRequest {
    pub ids: Vec<String>,
}

/// Resolve the documents attributed to an entity the user clicked.
pub async fn articles_by_ids_handler(
    State(state): State<ApiState>,
    Json(request): Json<ArticlesByIdsRequest>,
) -> Result<Json<Vec<Article>>, ApiError> {
    if request.ids.is_empty() {
        return Err(AppError::InvalidInput("ids must not be empty".into()).into());
    }

    let articles = Article::find_by_ids(&state.db, &request.ids).await?;
    Ok(Json(articles))
}

#[derive(Debug, Deserialize)]
pub struct RecentParams {
    pub limit: Option<usize>,
}

/// Suggested-reading fallback for the landing view.
pub async fn recent_articles_handler(
    State(state): State<ApiState>,
    Query(params): Query<RecentParams>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let limit = params.limit.unwrap_or(20);
    if limit == 0 || limit > MAX_RECENT_LIMIT {
        return Err(AppError::InvalidInput(format!(
            "limit must be between 1 and {MAX_RECENT_LIMIT}"
        ))
        .into());
    }

    let articles = Article::find_recent(&state.db, limit).await?;
    Ok(Json(articles))
}
