//! Shutdown coordination.

use std::time::Duration;

use tokio::sync::broadcast;

use crate::lifecycle::signals;

/// Coordinator for graceful shutdown.
///
/// Wraps a broadcast channel every long-running task subscribes to, plus
/// the drain window in-flight work is allowed after the trigger.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
    drain: Duration,
}

impl Shutdown {
    /// Create a coordinator with the given drain window.
    pub fn new(drain: Duration) -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx, drain }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// How long in-flight work may continue after the trigger.
    pub fn drain_window(&self) -> Duration {
        self.drain
    }

    /// Spawn a task that triggers this coordinator on SIGINT/SIGTERM.
    pub fn trigger_on_signal(&self) {
        let this = self.clone();
        tokio::spawn(async move {
            signals::shutdown_signal().await;
            this.trigger();
        });
    }
}
