//! Background removal of long-expired sessions

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use todo_core::traits::{RepoResult, SessionRepository};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Deletes sessions that expired more than `retention` ago
///
/// Only rows that can no longer validate are touched, so pruning never
/// changes whether a token is honored.
#[derive(Clone)]
pub struct SessionPruner {
    sessions: Arc<dyn SessionRepository>,
    retention: chrono::Duration,
}

impl SessionPruner {
    pub fn new(sessions: Arc<dyn SessionRepository>, retention_secs: i64) -> Self {
        Self {
            sessions,
            retention: chrono::Duration::seconds(retention_secs),
        }
    }

    /// Run one pass and return how many rows were deleted
    pub async fn prune_once(&self) -> RepoResult<u64> {
        let cutoff = Utc::now() - self.retention;
        let pruned = self.sessions.prune_expired(cutoff).await?;
        if pruned > 0 {
            info!(pruned, %cutoff, "Pruned expired sessions");
        } else {
            debug!(%cutoff, "No sessions to prune");
        }
        Ok(pruned)
    }

    /// Run a pass every `period` until the task is aborted
    pub fn spawn(self, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if let Err(e) = self.prune_once().await {
                    warn!(error = %e, "Session pruning failed");
                }
            }
        })
    }
}
