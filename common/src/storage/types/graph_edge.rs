use crate::storage::types::serde_helpers::deserialize_flexible_id;
use crate::{error::AppError, storage::db::SurrealDbClient};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EdgeMetadata {
    pub relation_type: String,
    pub weight: Option<f32>,
}

/// An edge in the `linked_to` RELATE table. Endpoints may be any mix of
/// entity and article nodes; classification happens at read time.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GraphEdge {
    #[serde(deserialize_with = "deserialize_flexible_id")]
    pub id: String,
    #[serde(rename = "in", deserialize_with = "deserialize_flexible_id")]
    pub in_: String,
    #[serde(deserialize_with = "deserialize_flexible_id")]
    pub out: String,
    pub metadata: EdgeMetadata,
}

impl GraphEdge {
    pub fn new(in_: String, out: String, relation_type: String, weight: Option<f32>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            in_,
            out,
            metadata: EdgeMetadata {
                relation_type,
                weight,
            },
        }
    }

    pub async fn store(&self, db_client: &SurrealDbClient) -> Result<(), AppError> {
        let weight_value = match self.metadata.weight {
            Some(weight) => weight.to_string(),
            None => "NONE".to_string(),
        };
        let query = format!(
            r#"RELATE graph_node:`{}`->linked_to:`{}`->graph_node:`{}`
            SET
                metadata.relation_type = '{}',
                metadata.weight = {}"#,
            self.in_, self.id, self.out, self.metadata.relation_type, weight_value
        );

        db_client.query(query).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::types::graph_node::GraphNode;

    async fn create_test_node(label: &str, db_client: &SurrealDbClient) -> String {
        let node = GraphNode::new_entity(label.to_string(), "Concept".to_string());
        let stored: Option<GraphNode> = db_client
            .store_item(node)
            .await
            .expect("Failed to store node");
        stored.expect("Node should be returned").id
    }

    #[tokio::test]
    async fn test_edge_creation() {
        let edge = GraphEdge::new(
            "a".to_string(),
            "b".to_string(),
            "affects".to_string(),
            Some(2.0),
        );

        assert_eq!(edge.in_, "a");
        assert_eq!(edge.out, "b");
        assert_eq!(edge.metadata.relation_type, "affects");
        assert_eq!(edge.metadata.weight, Some(2.0));
        assert!(!edge.id.is_empty());
    }

    #[tokio::test]
    async fn test_store_edge_and_read_back() {
        let namespace = "edge_test_ns";
        let database = &Uuid::new_v4().to_string();
        let db = SurrealDbClient::memory(namespace, database)
            .await
            .expect("Failed to start in-memory surrealdb");

        let in_id = create_test_node("Microgravity", &db).await;
        let out_id = create_test_node("Bone loss", &db).await;

        let edge = GraphEdge::new(in_id.clone(), out_id.clone(), "causes".to_string(), None);
        edge.store(&db).await.expect("Failed to store edge");

        let mut response = db
            .query("SELECT * FROM linked_to")
            .await
            .expect("Edge query failed");
        let edges: Vec<GraphEdge> = response.take(0).expect("Failed to read edges");

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].in_, in_id);
        assert_eq!(edges[0].out, out_id);
        assert_eq!(edges[0].metadata.relation_type, "causes");
        assert_eq!(edges[0].metadata.weight, None);
    }
}
