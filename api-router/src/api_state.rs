use std::sync::Arc;

use common::{storage::db::SurrealDbClient, utils::embedding::EmbeddingProvider};
use graph_pipeline::GraphTuning;
use search_pipeline::SearchTuning;

/// Per-request handler state. Constructed once by the process entry point
/// and cloned into each handler; the engine itself holds no globals.
#[derive(Clone)]
pub struct ApiState {
    pub db: Arc<SurrealDbClient>,
    pub embedder: Arc<EmbeddingProvider>,
    pub search_tuning: Arc<SearchTuning>,
    pub graph_tuning: Arc<GraphTuning>,
}

impl ApiState {
    pub fn new(db: Arc<SurrealDbClient>, embedder: Arc<EmbeddingProvider>) -> Self {
        Self {
            db,
            embedder,
            search_tuning: Arc::new(SearchTuning::default()),
            graph_tuning: Arc::new(GraphTuning::default()),
        }
    }
}
