use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::error;

use crate::engine::CredibilityEngine;

/// Explicit persistence policy for the shared graph.
///
/// Updates never touch disk; durability comes from this policy instead: a
/// periodic background snapshot plus an on-demand save the serve loop calls
/// at shutdown. Snapshots serialize under the engine's read lock, so they
/// are always internally consistent.
pub struct SnapshotPolicy {
    engine: Arc<CredibilityEngine>,
    path: PathBuf,
}

impl SnapshotPolicy {
    pub fn new(engine: Arc<CredibilityEngine>, path: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Spawn the periodic snapshot task. Failures are logged and the task
    /// keeps running; a missed snapshot only widens the replay window.
    pub fn spawn_periodic(&self, interval: Duration) -> JoinHandle<()> {
        let engine = Arc::clone(&self.engine);
        let path = self.path.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // First tick fires immediately; skip it so startup does not
            // rewrite the snapshot just loaded
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(e) = engine.snapshot(&path).await {
                    error!("Periodic snapshot failed: {}", e);
                }
            }
        })
    }

    pub async fn save_now(&self) -> Result<()> {
        self.engine.snapshot(&self.path).await
    }
}
