use std::time::Duration;

/// Tunable parameters for the document search pipeline. The candidate pool
/// handed to the ANN query is widened to `limit * candidate_multiplier`
/// (bounded below and above) to improve recall before the final top-`limit`
/// cut.
#[derive(Debug, Clone)]
pub struct SearchTuning {
    pub candidate_multiplier: usize,
    pub min_candidates: usize,
    pub max_candidates: usize,
    pub max_limit: usize,
    pub default_limit: usize,
    /// Budget for each external call (embedding, index query, article join).
    /// On expiry the stage reports the matching `*Unavailable` condition
    /// instead of hanging the caller.
    pub external_timeout: Duration,
}

impl Default for SearchTuning {
    fn default() -> Self {
        Self {
            candidate_multiplier: 10,
            min_candidates: 40,
            max_candidates: 10_000,
            max_limit: 1000,
            default_limit: 100,
            external_timeout: Duration::from_secs(10),
        }
    }
}

impl SearchTuning {
    pub fn candidate_pool(&self, limit: usize) -> usize {
        (limit.saturating_mul(self.candidate_multiplier))
            .clamp(self.min_candidates, self.max_candidates)
    }
}
