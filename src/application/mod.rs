//! Application layer - orchestration around the intake engine.
//!
//! The dispatcher drives one channel's message flow; the sweeper evicts
//! expired sessions on a schedule. Both are constructor-injected with the
//! engine and the collaborator ports they use - nothing here is a
//! process-wide singleton.

pub mod dispatcher;
pub mod sweeper;

pub use dispatcher::{DispatchError, TriageDispatcher};
pub use sweeper::spawn_sweeper;
