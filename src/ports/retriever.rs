//! Retriever port for ranked documentation search.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A passage of documentation relevant to a query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    /// Passage text.
    pub content: String,
    /// Similarity score assigned by the backend.
    pub score: f32,
    /// Where the passage came from, when the backend knows.
    pub source: Option<String>,
}

impl Passage {
    /// Creates a passage without source attribution.
    pub fn new(content: impl Into<String>, score: f32) -> Self {
        Self {
            content: content.into(),
            score,
            source: None,
        }
    }
}

/// Errors surfaced by the retrieval backend.
#[derive(Debug, Error)]
pub enum RetrieverError {
    #[error("retrieval backend unavailable: {0}")]
    Unavailable(String),

    #[error("retrieval query failed: {0}")]
    QueryFailed(String),
}

/// Ranked similarity search over the documentation corpus.
///
/// Implementations own score thresholds and index maintenance; callers only
/// see passages already ranked best-first.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Returns up to `top_k` passages ranked by relevance to `query`.
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<Passage>, RetrieverError>;
}
