//! Intake session state.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::Timestamp;

/// Phase of an intake session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakePhase {
    /// Awaiting more answers.
    Collecting,
    /// All questions answered; the record is ready for hand-off.
    Completed,
}

/// In-memory record of one identity's progress through the question
/// sequence.
///
/// `started_at` is set once at session start and never refreshed by
/// answers; the expiry window is measured from it regardless of activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeSession {
    pub phase: IntakePhase,
    /// Index of the next unanswered question.
    pub cursor: usize,
    /// Answers keyed by question name.
    pub answers: HashMap<String, String>,
    pub started_at: Timestamp,
}

impl IntakeSession {
    /// Creates a fresh session at the start of the question sequence.
    pub fn new() -> Self {
        Self {
            phase: IntakePhase::Collecting,
            cursor: 0,
            answers: HashMap::new(),
            started_at: Timestamp::now(),
        }
    }

    /// Age of the session as seen from `now`.
    pub fn age(&self, now: &Timestamp) -> Duration {
        now.duration_since(&self.started_at)
    }

    /// True once the session has outlived the expiry window.
    ///
    /// Strictly greater-than: a session exactly at the window boundary is
    /// still live.
    pub fn is_expired(&self, now: &Timestamp, window: Duration) -> bool {
        self.age(now) > window
    }
}

impl Default for IntakeSession {
    fn default() -> Self {
        Self::new()
    }
}
