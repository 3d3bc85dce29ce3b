use async_openai::error::OpenAIError;
use thiserror::Error;

// Core internal errors. The three `*Unavailable` variants are only produced
// at the external-call boundaries (embedding service, vector index, graph
// engine) and carry the originating stage in their message; the engine never
// retries them itself, the caller decides.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("embedding service unavailable: {0}")]
    EmbeddingUnavailable(String),
    #[error("vector index unavailable: {0}")]
    IndexUnavailable(String),
    #[error("graph engine unavailable: {0}")]
    GraphUnavailable(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("Database error: {0}")]
    Database(#[from] surrealdb::Error),
    #[error("OpenAI error: {0}")]
    OpenAI(#[from] OpenAIError),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("IoError: {0}")]
    Io(#[from] std::io::Error),
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

impl AppError {
    /// True for failures the caller may usefully retry with backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::EmbeddingUnavailable(_) | Self::IndexUnavailable(_) | Self::GraphUnavailable(_)
        )
    }

    /// The external stage a retryable failure originated from, if any.
    pub fn failed_stage(&self) -> Option<&'static str> {
        match self {
            Self::EmbeddingUnavailable(_) => Some("embedding"),
            Self::IndexUnavailable(_) => Some("vector-index"),
            Self::GraphUnavailable(_) => Some("graph-engine"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_variants_are_retryable() {
        assert!(AppError::EmbeddingUnavailable("timeout".into()).is_retryable());
        assert!(AppError::IndexUnavailable("timeout".into()).is_retryable());
        assert!(AppError::GraphUnavailable("timeout".into()).is_retryable());
    }

    #[test]
    fn invalid_input_is_not_retryable() {
        let err = AppError::InvalidInput("empty query".into());
        assert!(!err.is_retryable());
        assert!(err.failed_stage().is_none());
    }

    #[test]
    fn failed_stage_names_the_origin() {
        assert_eq!(
            AppError::GraphUnavailable("down".into()).failed_stage(),
            Some("graph-engine")
        );
        assert_eq!(
            AppError::EmbeddingUnavailable("down".into()).failed_stage(),
            Some("embedding")
        );
    }
}
