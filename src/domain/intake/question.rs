//! Intake question configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::ValidationError;

/// A single intake question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier the answer is stored under.
    pub name: String,
    /// Text shown to the user.
    #[serde(alias = "question")]
    pub prompt: String,
    /// Whether the flow insists on an answer for this field.
    #[serde(default = "default_required")]
    pub required: bool,
}

impl Question {
    /// Creates a new question.
    pub fn new(name: impl Into<String>, prompt: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            required,
        }
    }
}

fn default_required() -> bool {
    true
}

/// Ordered, validated sequence of intake questions.
///
/// Order is significant and fixed for a session's lifetime. Construction
/// rejects an empty sequence, blank names or prompts, and duplicate names,
/// so downstream code can index by cursor without further checks.
#[derive(Debug, Clone)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Validates and wraps an ordered question sequence.
    pub fn new(questions: Vec<Question>) -> Result<Self, ValidationError> {
        if questions.is_empty() {
            return Err(ValidationError::empty_field("questions"));
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if question.name.trim().is_empty() {
                return Err(ValidationError::empty_field("question.name"));
            }
            if question.prompt.trim().is_empty() {
                return Err(ValidationError::empty_field("question.prompt"));
            }
            if !seen.insert(question.name.as_str()) {
                return Err(ValidationError::invalid_format(
                    "questions",
                    format!("duplicate question name '{}'", question.name),
                ));
            }
        }

        Ok(Self { questions })
    }

    /// Number of questions in the sequence.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// True when the sequence has no questions. Construction forbids this,
    /// so this only exists to pair with `len`.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Returns the question at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Returns the first question. Safe: the sequence is never empty.
    pub fn first(&self) -> &Question {
        &self.questions[0]
    }

    /// Iterates the questions in order.
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}
