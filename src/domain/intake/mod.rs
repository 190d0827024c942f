//! The guided information-collection dialogue.
//!
//! A user's first support message kicks off a fixed sequence of intake
//! questions. The [`IntakeEngine`] tracks each conversation's progress
//! through that sequence, detects session expiry, and hands the collected
//! answers back to the caller once the sequence is exhausted.

mod engine;
mod question;
mod session;
mod summary;
mod values;

pub use engine::{IntakeEngine, DEFAULT_SESSION_TTL_SECS};
pub use question::{Question, QuestionSet};
pub use session::{IntakePhase, IntakeSession};
pub use summary::{field_label, NO_DATA_SUMMARY};
pub use values::{IntakeOutcome, Prompt};
