use std::collections::{HashMap, HashSet};

use surrealdb::sql::Thing;
use tracing::debug;

use common::{
    error::AppError,
    storage::{
        db::SurrealDbClient,
        types::{graph_edge::GraphEdge, graph_node::GraphNode, StoredObject},
    },
};

/// An entity-to-entity relation surviving classification, still carrying raw
/// node ids.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedRelation {
    pub source: String,
    pub target: String,
    pub relation_type: String,
    pub weight: Option<f32>,
}

/// Classified neighborhood of the seed set: the relations among seeds and
/// the article attributions per seed entity.
#[derive(Debug, Default)]
pub struct Neighborhood {
    pub relations: Vec<CollectedRelation>,
    pub article_refs: HashMap<String, Vec<String>>,
}

/// Classify everything directly connected to the seed set. `edges` is the
/// full edge list already fetched for degree ranking; only the edges
/// incident to a seed are considered. Neighbors that are neither articles
/// nor seeds are outside the requested view and ignored, which bounds the
/// result to the top-entity neighborhood.
pub async fn collect(
    db_client: &SurrealDbClient,
    seeds: &[GraphNode],
    edges: &[GraphEdge],
) -> Result<Neighborhood, AppError> {
    if seeds.is_empty() {
        return Ok(Neighborhood::default());
    }

    let incident = incident_edges(seeds, edges);
    let neighbors = fetch_neighbor_nodes(db_client, seeds, &incident).await?;

    let neighborhood = classify(seeds, &incident, &neighbors);

    debug!(
        seeds = seeds.len(),
        incident_edges = incident.len(),
        relations = neighborhood.relations.len(),
        attributed_entities = neighborhood.article_refs.len(),
        "Collected seed neighborhood"
    );

    Ok(neighborhood)
}

/// Edges touching at least one seed, in their original order.
pub fn incident_edges(seeds: &[GraphNode], edges: &[GraphEdge]) -> Vec<GraphEdge> {
    let seed_ids: HashSet<&str> = seeds.iter().map(|node| node.id.as_str()).collect();
    edges
        .iter()
        .filter(|edge| {
            seed_ids.contains(edge.in_.as_str()) || seed_ids.contains(edge.out.as_str())
        })
        .cloned()
        .collect()
}

async fn fetch_neighbor_nodes(
    db_client: &SurrealDbClient,
    seeds: &[GraphNode],
    edges: &[GraphEdge],
) -> Result<HashMap<String, GraphNode>, AppError> {
    let seed_ids: HashSet<&str> = seeds.iter().map(|node| node.id.as_str()).collect();

    let mut neighbor_ids: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for edge in edges {
        for endpoint in [&edge.in_, &edge.out] {
            if !seed_ids.contains(endpoint.as_str()) && seen.insert(endpoint.clone()) {
                neighbor_ids.push(endpoint.clone());
            }
        }
    }

    if neighbor_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let thing_ids: Vec<Thing> = neighbor_ids
        .iter()
        .map(|id| Thing::from((GraphNode::table_name(), id.as_str())))
        .collect();

    let mut response = db_client
        .query("SELECT * FROM type::table($table) WHERE id IN $things")
        .bind(("table", GraphNode::table_name().to_owned()))
        .bind(("things", thing_ids))
        .await
        .map_err(|err| AppError::GraphUnavailable(format!("neighbor node query failed: {err}")))?;

    let nodes: Vec<GraphNode> = response
        .take(0)
        .map_err(|err| AppError::GraphUnavailable(format!("neighbor node result malformed: {err}")))?;

    Ok(nodes
        .into_iter()
        .map(|node| (node.id.clone(), node))
        .collect())
}

/// Pure classification fold over the fetched records. For every edge:
/// seed-to-seed becomes a relation (direction preserved), seed-to-article
/// becomes an attribution entry, anything else is dropped.
pub fn classify(
    seeds: &[GraphNode],
    edges: &[GraphEdge],
    neighbors: &HashMap<String, GraphNode>,
) -> Neighborhood {
    let seed_ids: HashSet<&str> = seeds.iter().map(|node| node.id.as_str()).collect();

    let mut relations = Vec::new();
    let mut article_refs: HashMap<String, Vec<String>> = HashMap::new();
    let mut seen_refs: HashSet<(String, String)> = HashSet::new();

    for edge in edges {
        let in_is_seed = seed_ids.contains(edge.in_.as_str());
        let out_is_seed = seed_ids.contains(edge.out.as_str());

        if in_is_seed && out_is_seed {
            relations.push(CollectedRelation {
                source: edge.in_.clone(),
                target: edge.out.clone(),
                relation_type: edge.metadata.relation_type.clone(),
                weight: edge.metadata.weight,
            });
            continue;
        }

        let (seed_id, other_id) = if in_is_seed {
            (&edge.in_, &edge.out)
        } else if out_is_seed {
            (&edge.out, &edge.in_)
        } else {
            continue;
        };

        let Some(neighbor) = neighbors.get(other_id) else {
            continue;
        };

        if !neighbor.is_article() {
            // Entity outside the seed set: not part of the requested view.
            continue;
        }

        let Some(article_id) = &neighbor.article_id else {
            debug!(node = %neighbor.id, "Article node without article reference, skipping");
            continue;
        };

        if seen_refs.insert((seed_id.clone(), article_id.clone())) {
            article_refs
                .entry(seed_id.clone())
                .or_default()
                .push(article_id.clone());
        }
    }

    Neighborhood {
        relations,
        article_refs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: &str) -> GraphNode {
        let mut node = GraphNode::new_entity(format!("Entity {id}"), "Concept".to_string());
        node.id = id.to_string();
        node
    }

    fn article_node(id: &str, article_id: &str) -> GraphNode {
        let mut node =
            GraphNode::new_article(article_id.to_string(), format!("Article {article_id}"));
        node.id = id.to_string();
        node
    }

    fn edge(in_: &str, out: &str, relation_type: &str) -> GraphEdge {
        GraphEdge::new(
            in_.to_string(),
            out.to_string(),
            relation_type.to_string(),
            None,
        )
    }

    fn neighbor_map(nodes: Vec<GraphNode>) -> HashMap<String, GraphNode> {
        nodes
            .into_iter()
            .map(|node| (node.id.clone(), node))
            .collect()
    }

    #[test]
    fn incident_edges_keeps_only_seed_touching_edges() {
        let seeds = vec![entity("a")];
        let edges = vec![
            edge("a", "b", "affects"),
            edge("c", "a", "causes"),
            edge("c", "d", "unrelated"),
        ];

        let incident = incident_edges(&seeds, &edges);

        assert_eq!(incident.len(), 2);
        assert!(incident
            .iter()
            .all(|e| e.in_ == "a" || e.out == "a"));
    }

    #[test]
    fn seed_to_seed_edges_become_relations() {
        let seeds = vec![entity("a"), entity("b")];
        let edges = vec![edge("a", "b", "affects")];

        let neighborhood = classify(&seeds, &edges, &HashMap::new());

        assert_eq!(
            neighborhood.relations,
            vec![CollectedRelation {
                source: "a".to_string(),
                target: "b".to_string(),
                relation_type: "affects".to_string(),
                weight: None,
            }]
        );
        assert!(neighborhood.article_refs.is_empty());
    }

    #[test]
    fn article_neighbors_become_attributions_not_edges() {
        let seeds = vec![entity("a")];
        let edges = vec![edge("a", "n1", "mentioned_in")];
        let neighbors = neighbor_map(vec![article_node("n1", "article-1")]);

        let neighborhood = classify(&seeds, &edges, &neighbors);

        assert!(neighborhood.relations.is_empty());
        assert_eq!(
            neighborhood.article_refs.get("a"),
            Some(&vec!["article-1".to_string()])
        );
    }

    #[test]
    fn duplicate_article_links_are_deduplicated() {
        let seeds = vec![entity("a")];
        let edges = vec![
            edge("a", "n1", "mentioned_in"),
            edge("n1", "a", "mentions"),
        ];
        let neighbors = neighbor_map(vec![article_node("n1", "article-1")]);

        let neighborhood = classify(&seeds, &edges, &neighbors);

        assert_eq!(
            neighborhood.article_refs.get("a"),
            Some(&vec!["article-1".to_string()])
        );
    }

    #[test]
    fn non_seed_entity_neighbors_are_ignored() {
        let seeds = vec![entity("a")];
        let edges = vec![edge("a", "outsider", "related_to")];
        let neighbors = neighbor_map(vec![entity("outsider")]);

        let neighborhood = classify(&seeds, &edges, &neighbors);

        assert!(neighborhood.relations.is_empty());
        assert!(neighborhood.article_refs.is_empty());
    }

    #[test]
    fn article_nodes_without_reference_are_dropped() {
        let seeds = vec![entity("a")];
        let edges = vec![edge("a", "n1", "mentioned_in")];
        let mut broken = article_node("n1", "ignored");
        broken.article_id = None;
        let neighbors = neighbor_map(vec![broken]);

        let neighborhood = classify(&seeds, &edges, &neighbors);

        assert!(neighborhood.article_refs.is_empty());
    }

    #[test]
    fn edge_direction_is_preserved() {
        let seeds = vec![entity("a"), entity("b")];
        let edges = vec![edge("b", "a", "regulates")];

        let neighborhood = classify(&seeds, &edges, &HashMap::new());

        assert_eq!(neighborhood.relations[0].source, "b");
        assert_eq!(neighborhood.relations[0].target, "a");
    }
}
