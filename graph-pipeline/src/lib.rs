pub mod collector;
pub mod config;
pub mod normalizer;
pub mod selector;

use serde::Serialize;
use tokio::time::timeout;
use tracing::{info, instrument};

use common::{error::AppError, storage::db::SurrealDbClient};

pub use config::GraphTuning;

/// A concept node in the final payload. `article_ids` carries the supporting
/// documents; documents are never nodes in this view.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GraphEntity {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(rename = "articleIds")]
    pub article_ids: Vec<String>,
}

/// A directed edge between two entity ids of the same response. Both
/// endpoints are guaranteed to exist in the accompanying entity list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GraphRelation {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub relation_type: String,
    pub weight: Option<f32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeGraph {
    pub entities: Vec<GraphEntity>,
    pub relations: Vec<GraphRelation>,
}

/// Build the bounded knowledge-graph view: the `k` highest-degree entities,
/// the relations among them, and the articles attributed to each. Fails as a
/// whole on graph-engine trouble; no partial graph is ever returned.
#[instrument(skip_all)]
pub async fn build_knowledge_graph(
    db_client: &SurrealDbClient,
    k: usize,
    tuning: &GraphTuning,
) -> Result<KnowledgeGraph, AppError> {
    if k == 0 {
        return Err(AppError::InvalidInput("k must be positive".into()));
    }
    if k > tuning.max_entities {
        return Err(AppError::InvalidInput(format!(
            "k must not exceed {}",
            tuning.max_entities
        )));
    }

    let edges = timeout(
        tuning.external_timeout,
        selector::fetch_all_edges(db_client),
    )
    .await
    .map_err(|_| AppError::GraphUnavailable("edge query timed out".into()))??;

    let seeds = timeout(
        tuning.external_timeout,
        selector::top_entities(db_client, &edges, k),
    )
    .await
    .map_err(|_| AppError::GraphUnavailable("top-entity query timed out".into()))??;

    let neighborhood = timeout(
        tuning.external_timeout,
        collector::collect(db_client, &seeds, &edges),
    )
    .await
    .map_err(|_| AppError::GraphUnavailable("neighborhood query timed out".into()))??;

    let graph = normalizer::normalize(seeds, neighborhood);

    info!(
        k,
        entities = graph.entities.len(),
        relations = graph.relations.len(),
        "Knowledge graph assembled"
    );

    Ok(graph)
}
