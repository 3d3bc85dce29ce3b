use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use graph_pipeline::{build_knowledge_graph, KnowledgeGraph};

use crate::{api_state::ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct GraphParams {
    pub k: Option<usize>,
}

/// A failed graph fetch returns an error body and no partial graph.
pub async fn knowledge_graph_handler(
    State(state): State<ApiState>,
    Query(params): Query<GraphParams>,
) -> Result<Json<KnowledgeGraph>, ApiError> {
    let k = params.k.unwrap_or(state.graph_tuning.default_k);
    let graph = build_knowledge_graph(&state.db, k, &state.graph_tuning).await?;
    Ok(Json(graph))
}
