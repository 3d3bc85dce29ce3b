use crate::stored_object;
use uuid::Uuid;

/// One physical node table, two logical kinds. Article nodes are folded into
/// per-entity attribution lists downstream, never rendered as graph nodes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Entity,
    Article,
}

stored_object!(GraphNode, "graph_node", {
    kind: NodeKind,
    label: String,
    category: String,
    article_id: Option<String>
});

impl GraphNode {
    pub fn new_entity(label: String, category: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            kind: NodeKind::Entity,
            label,
            category,
            article_id: None,
        }
    }

    pub fn new_article(article_id: String, label: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            kind: NodeKind::Article,
            label,
            category: "Article".to_string(),
            article_id: Some(article_id),
        }
    }

    pub fn is_article(&self) -> bool {
        self.kind == NodeKind::Article
    }
}
