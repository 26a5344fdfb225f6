//! Periodic reclamation of limiter state.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

use crate::limiter::registry::LimiterRegistry;

/// Background task that sweeps the registry on a fixed interval.
///
/// A sweep discards all bucket state, including that of active clients.
/// Crude, but it keeps memory bounded under high-cardinality traffic
/// without tracking per-entry access times.
pub struct Sweeper {
    registry: Arc<LimiterRegistry>,
    interval: Duration,
}

impl Sweeper {
    pub fn new(registry: Arc<LimiterRegistry>, interval: Duration) -> Self {
        Self { registry, interval }
    }

    /// Run until the shutdown signal fires.
    ///
    /// The task's lifetime is bound to the server's shutdown handle; it is
    /// never an unscoped perpetual loop.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Reclamation sweeper starting"
        );

        let mut ticker = time::interval(self.interval);
        // The first tick completes immediately; consume it so the first
        // real sweep lands one full interval after startup.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let evicted = self.registry.sweep();
                    tracing::debug!(evicted, "Swept limiter registry");
                }
                _ = shutdown.recv() => {
                    tracing::info!("Sweeper received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
