//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Questions file could not be read: {0}")]
    QuestionsFileUnreadable(#[from] std::io::Error),

    #[error("Questions file could not be parsed: {0}")]
    QuestionsFileInvalid(#[from] serde_yaml::Error),

    #[error("Question sequence rejected: {0}")]
    QuestionsRejected(#[from] crate::domain::foundation::ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Questions file path is empty")]
    EmptyQuestionsFile,

    #[error("Session TTL must be greater than zero")]
    InvalidSessionTtl,

    #[error("Sweep interval must be greater than zero")]
    InvalidSweepInterval,

    #[error("Retrieval top_k must be at least 1")]
    InvalidTopK,
}
