//! Periodic expiry sweep for intake sessions.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

use crate::domain::intake::IntakeEngine;

/// Spawns a background task that removes expired sessions on a fixed
/// interval.
///
/// The engine never schedules its own eviction; the hosting service owns
/// the returned handle and aborts it at shutdown.
pub fn spawn_sweeper(engine: Arc<IntakeEngine>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // interval() yields its first tick immediately; consume it.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = engine.sweep_expired().await;
            if removed > 0 {
                info!(removed, "expiry sweep removed sessions");
            }
        }
    })
}
