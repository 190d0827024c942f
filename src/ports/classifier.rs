//! Classifier port for sorting support questions into ticket categories.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Ticket category a support question resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketCategory {
    Bug,
    Feature,
    Usage,
    Unknown,
}

impl TicketCategory {
    /// Human-readable label for outbound messages.
    pub fn label(&self) -> &'static str {
        match self {
            TicketCategory::Bug => "Defect / bug",
            TicketCategory::Feature => "Feature request",
            TicketCategory::Usage => "Usage question",
            TicketCategory::Unknown => "Unclassified",
        }
    }

    /// Parses a category name, mapping anything unrecognized to `Unknown`.
    ///
    /// Classifier backends echo free text; this is the lenient edge where
    /// that text becomes a closed enum.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "bug" => TicketCategory::Bug,
            "feature" => TicketCategory::Feature,
            "usage" => TicketCategory::Usage,
            _ => TicketCategory::Unknown,
        }
    }
}

impl fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TicketCategory::Bug => "bug",
            TicketCategory::Feature => "feature",
            TicketCategory::Usage => "usage",
            TicketCategory::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Result of classifying a question.
///
/// Field names follow the classifier's wire contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    /// Category the question was filed under.
    #[serde(rename = "type")]
    pub category: TicketCategory,
    /// Confidence in the range 0.0..=1.0.
    pub confidence: f32,
    /// Why the classifier chose this category.
    #[serde(rename = "reason")]
    pub rationale: String,
    /// Suggested reply to surface to the user.
    #[serde(rename = "suggested_answer", default)]
    pub suggested_reply: String,
}

impl Classification {
    /// Confidence as a whole percentage, truncated.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0) as u32
    }
}

/// Errors surfaced by the classification backend.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier backend unavailable: {0}")]
    Unavailable(String),

    #[error("classifier returned an unusable response: {0}")]
    InvalidResponse(String),
}

/// Categorizes a question given retrieved context and collected details.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(
        &self,
        question: &str,
        context: &str,
        details: &HashMap<String, String>,
    ) -> Result<Classification, ClassifierError>;
}
