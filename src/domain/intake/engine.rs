//! The conversation state engine for guided information collection.
//!
//! Tracks, per conversation key, progress through the ordered question
//! sequence. Sessions live in process memory only. Expiry is passive: it is
//! observed by `submit` (restart) and `is_active` (removal) and enforced in
//! bulk by `sweep_expired`, which the hosting service schedules itself.
//!
//! Two behaviors are deliberate and load-bearing for callers:
//!
//! - A message arriving with no live session (including one that just
//!   expired) restarts the flow and the message text is discarded. The
//!   first freeform message a user sends is never recorded as an answer.
//! - `answers` never checks expiry, while `is_active` deletes expired
//!   sessions on observation. Callers branch on `is_active` and then read
//!   `answers` in the same tick; the read must not see the session vanish.

use chrono::Duration;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;

use crate::domain::foundation::{ConversationKey, Timestamp};

use super::question::QuestionSet;
use super::session::{IntakePhase, IntakeSession};
use super::summary;
use super::values::{IntakeOutcome, Prompt};

/// Default expiry window: sessions older than this are treated as gone.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 30 * 60;

/// Per-identity guided intake state machine.
///
/// All operations take a single lock guard for their whole read-modify-write,
/// so concurrent deliveries for the same key cannot interleave.
pub struct IntakeEngine {
    questions: QuestionSet,
    session_ttl: Duration,
    sessions: RwLock<HashMap<ConversationKey, IntakeSession>>,
}

impl IntakeEngine {
    /// Creates an engine over a question sequence with an explicit expiry
    /// window.
    pub fn new(questions: QuestionSet, session_ttl: Duration) -> Self {
        Self {
            questions,
            session_ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Creates an engine with the standard 30-minute expiry window.
    pub fn with_default_ttl(questions: QuestionSet) -> Self {
        Self::new(questions, Duration::seconds(DEFAULT_SESSION_TTL_SECS))
    }

    /// Starts a new session for `key`, discarding any prior progress.
    ///
    /// Returns the first question's prompt. Calling this twice loses the
    /// first call's answers; that is the contract, not an accident.
    pub async fn begin(&self, key: &ConversationKey) -> Prompt {
        let mut sessions = self.sessions.write().await;
        self.start_locked(&mut sessions, key)
    }

    /// Feeds one inbound message to the session for `key`.
    ///
    /// With no live session (missing or expired), the flow restarts and
    /// `text` is discarded. Otherwise `text` is recorded as the answer to
    /// the current question and the cursor advances, yielding either the
    /// next prompt or the completed answer set. A completed session stays
    /// in the map until the caller cancels it or it expires.
    pub async fn submit(&self, key: &ConversationKey, text: &str) -> IntakeOutcome {
        let mut sessions = self.sessions.write().await;
        let now = Timestamp::now();

        let restart = match sessions.get(key) {
            None => true,
            Some(session) => {
                let expired = session.is_expired(&now, self.session_ttl);
                if expired {
                    info!(key = %key, "intake session expired, restarting");
                }
                expired
            }
        };
        if restart {
            return IntakeOutcome::Prompt(self.start_locked(&mut sessions, key));
        }

        if let Some(session) = sessions.get_mut(key) {
            if session.phase == IntakePhase::Completed {
                return IntakeOutcome::Completed {
                    collected_data: session.answers.clone(),
                };
            }

            if let Some(question) = self.questions.get(session.cursor) {
                session.answers.insert(question.name.clone(), text.to_string());
                session.cursor += 1;
            }

            match self.questions.get(session.cursor) {
                Some(next) => IntakeOutcome::Prompt(Prompt::for_question(next)),
                None => {
                    session.phase = IntakePhase::Completed;
                    IntakeOutcome::Completed {
                        collected_data: session.answers.clone(),
                    }
                }
            }
        } else {
            IntakeOutcome::Prompt(self.start_locked(&mut sessions, key))
        }
    }

    /// True iff `key` has a live, unexpired session still collecting.
    ///
    /// An expired session is removed on observation and reported as absent.
    pub async fn is_active(&self, key: &ConversationKey) -> bool {
        let mut sessions = self.sessions.write().await;
        let now = Timestamp::now();

        let (present, expired, collecting) = match sessions.get(key) {
            None => (false, false, false),
            Some(session) => (
                true,
                session.is_expired(&now, self.session_ttl),
                session.phase == IntakePhase::Collecting,
            ),
        };

        if !present {
            return false;
        }
        if expired {
            sessions.remove(key);
            info!(key = %key, "removed expired intake session");
            return false;
        }
        collecting
    }

    /// Snapshot of the answers recorded so far, or `None` with no session.
    ///
    /// Expiry is not checked here.
    pub async fn answers(&self, key: &ConversationKey) -> Option<HashMap<String, String>> {
        let sessions = self.sessions.read().await;
        sessions.get(key).map(|session| session.answers.clone())
    }

    /// Unconditionally removes the session for `key`. No-op when absent.
    pub async fn cancel(&self, key: &ConversationKey) {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(key).is_some() {
            info!(key = %key, "intake session cancelled");
        }
    }

    /// Removes every session older than the expiry window.
    ///
    /// Returns how many were removed. The engine never schedules this;
    /// see the application sweeper.
    pub async fn sweep_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let now = Timestamp::now();
        let before = sessions.len();

        sessions.retain(|key, session| {
            let keep = !session.is_expired(&now, self.session_ttl);
            if !keep {
                info!(key = %key, "swept expired intake session");
            }
            keep
        });

        before - sessions.len()
    }

    /// Renders the recorded answers as a bullet list, one line per answer,
    /// or a fixed sentinel when nothing has been collected.
    pub async fn summarize(&self, key: &ConversationKey) -> String {
        let sessions = self.sessions.read().await;
        match sessions.get(key) {
            Some(session) if !session.answers.is_empty() => {
                summary::render(&self.questions, &session.answers)
            }
            _ => summary::NO_DATA_SUMMARY.to_string(),
        }
    }

    fn start_locked(
        &self,
        sessions: &mut HashMap<ConversationKey, IntakeSession>,
        key: &ConversationKey,
    ) -> Prompt {
        sessions.insert(key.clone(), IntakeSession::new());
        Prompt::for_question(self.questions.first())
    }

    /// Shifts a session's start time into the past. Test hook for expiry.
    #[cfg(test)]
    pub(crate) async fn backdate(&self, key: &ConversationKey, by: Duration) {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(key) {
            session.started_at =
                Timestamp::from_datetime(*session.started_at.as_datetime() - by);
        }
    }
}
