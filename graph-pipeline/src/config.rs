use std::time::Duration;

/// Bounds for the knowledge-graph view. This is a summarization view over
/// the property graph, not an export; callers wanting more than
/// `max_entities` need a different surface.
#[derive(Debug, Clone)]
pub struct GraphTuning {
    pub default_k: usize,
    pub max_entities: usize,
    /// Budget per graph-engine call; expiry reports `GraphUnavailable`.
    pub external_timeout: Duration,
}

impl Default for GraphTuning {
    fn default() -> Self {
        Self {
            default_k: 40,
            max_entities: 200,
            external_timeout: Duration::from_secs(10),
        }
    }
}
