use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Invalid state: {0}")]
    State(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Generation failed: {0}")]
    Generation(String),
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
