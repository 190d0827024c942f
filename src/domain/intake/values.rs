//! Values the intake engine hands back to its caller.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::question::Question;

/// The next question to put to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// Display text for the question.
    pub message: String,
    /// Name the eventual answer will be stored under.
    pub field_name: String,
    /// Whether the field is required.
    pub required: bool,
}

impl Prompt {
    /// Builds the prompt for a question.
    pub fn for_question(question: &Question) -> Self {
        Self {
            message: question.prompt.clone(),
            field_name: question.name.clone(),
            required: question.required,
        }
    }
}

/// Result of feeding one inbound message to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum IntakeOutcome {
    /// More answers are needed; relay the prompt to the user.
    Prompt(Prompt),
    /// The sequence is exhausted; hand the answers to classification.
    Completed {
        collected_data: HashMap<String, String>,
    },
}

impl IntakeOutcome {
    /// True for the completed variant.
    pub fn is_completed(&self) -> bool {
        matches!(self, IntakeOutcome::Completed { .. })
    }
}
