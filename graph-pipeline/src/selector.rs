use std::collections::HashMap;

use tracing::debug;

use common::{
    error::AppError,
    storage::{
        db::SurrealDbClient,
        types::{
            graph_edge::GraphEdge,
            graph_node::{GraphNode, NodeKind},
            StoredObject,
        },
    },
};

/// Fetch every edge in the graph. The degree fold happens client-side; the
/// edge table is the authority on connectivity.
pub async fn fetch_all_edges(db_client: &SurrealDbClient) -> Result<Vec<GraphEdge>, AppError> {
    let mut response = db_client
        .query("SELECT * FROM linked_to")
        .await
        .map_err(|err| AppError::GraphUnavailable(format!("edge query failed: {err}")))?;

    let edges: Vec<GraphEdge> = response
        .take(0)
        .map_err(|err| AppError::GraphUnavailable(format!("edge result malformed: {err}")))?;

    Ok(edges)
}

async fn fetch_entity_nodes(db_client: &SurrealDbClient) -> Result<Vec<GraphNode>, AppError> {
    let mut response = db_client
        .query("SELECT * FROM type::table($table) WHERE kind = $kind")
        .bind(("table", GraphNode::table_name().to_owned()))
        .bind(("kind", NodeKind::Entity))
        .await
        .map_err(|err| AppError::GraphUnavailable(format!("entity node query failed: {err}")))?;

    let nodes: Vec<GraphNode> = response
        .take(0)
        .map_err(|err| AppError::GraphUnavailable(format!("entity node result malformed: {err}")))?;

    Ok(nodes)
}

/// Select the `k` entity nodes with the highest total relationship degree
/// (all edge types, both directions, article links included). `edges` is
/// the full edge list, shared with the collector downstream.
pub async fn top_entities(
    db_client: &SurrealDbClient,
    edges: &[GraphEdge],
    k: usize,
) -> Result<Vec<GraphNode>, AppError> {
    let nodes = fetch_entity_nodes(db_client).await?;

    let degrees = degree_counts(edges);
    let selected = rank_by_degree(nodes, &degrees, k);

    debug!(
        edges = edges.len(),
        selected = selected.len(),
        k,
        "Selected top entities by degree"
    );

    Ok(selected)
}

/// Total degree per node id, counting both endpoints of every edge.
pub fn degree_counts(edges: &[GraphEdge]) -> HashMap<String, usize> {
    let mut degrees: HashMap<String, usize> = HashMap::new();
    for edge in edges {
        *degrees.entry(edge.in_.clone()).or_default() += 1;
        *degrees.entry(edge.out.clone()).or_default() += 1;
    }
    degrees
}

/// Order nodes by descending degree, ascending node id on ties, and take the
/// first `k`. The id tie-break keeps repeated calls stable.
pub fn rank_by_degree(
    mut nodes: Vec<GraphNode>,
    degrees: &HashMap<String, usize>,
    k: usize,
) -> Vec<GraphNode> {
    nodes.sort_by(|a, b| {
        let degree_a = degrees.get(&a.id).copied().unwrap_or(0);
        let degree_b = degrees.get(&b.id).copied().unwrap_or(0);
        degree_b.cmp(&degree_a).then_with(|| a.id.cmp(&b.id))
    });
    nodes.truncate(k);
    nodes
}
