//! Retrieval configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Retrieval configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalConfig {
    /// Number of passages to pull per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl RetrievalConfig {
    /// Validate retrieval configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.top_k == 0 {
            return Err(ValidationError::InvalidTopK);
        }
        Ok(())
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

fn default_top_k() -> usize {
    5
}
