use std::collections::{HashMap, HashSet};

use tracing::debug;

use common::storage::types::graph_node::GraphNode;

use crate::{collector::Neighborhood, GraphEntity, GraphRelation, KnowledgeGraph};

/// Produce the final `{entities, relations}` payload: canonical string ids,
/// article attributions attached per entity, and relations restricted to
/// pairs whose both endpoints survived selection. Relations are ordered
/// `(source, target, type)` before ids are synthesized so an unchanged graph
/// yields the identical relation set on every call.
pub fn normalize(seeds: Vec<GraphNode>, neighborhood: Neighborhood) -> KnowledgeGraph {
    let Neighborhood {
        relations,
        mut article_refs,
    } = neighborhood;

    let entities: Vec<GraphEntity> = seeds
        .into_iter()
        .map(|node| {
            let article_ids = article_refs.remove(&node.id).unwrap_or_default();
            GraphEntity {
                id: node.id,
                label: node.label,
                entity_type: node.category,
                article_ids,
            }
        })
        .collect();

    let valid_ids: HashSet<&str> = entities.iter().map(|entity| entity.id.as_str()).collect();

    let mut kept: Vec<_> = relations
        .into_iter()
        .filter(|relation| {
            valid_ids.contains(relation.source.as_str())
                && valid_ids.contains(relation.target.as_str())
        })
        .collect();
    kept.sort_by(|a, b| {
        (&a.source, &a.target, &a.relation_type).cmp(&(&b.source, &b.target, &b.relation_type))
    });

    let mut pair_ordinals: HashMap<(String, String), usize> = HashMap::new();
    let relations: Vec<GraphRelation> = kept
        .into_iter()
        .map(|relation| {
            let ordinal = pair_ordinals
                .entry((relation.source.clone(), relation.target.clone()))
                .or_default();
            let id = format!("{}-{}-{}", relation.source, relation.target, *ordinal);
            *ordinal += 1;
            GraphRelation {
                id,
                source: relation.source,
                target: relation.target,
                relation_type: relation.relation_type,
                weight: relation.weight,
            }
        })
        .collect();

    debug!(
        entities = entities.len(),
        relations = relations.len(),
        "Normalized knowledge graph payload"
    );

    KnowledgeGraph {
        entities,
        relations,
    }
}
