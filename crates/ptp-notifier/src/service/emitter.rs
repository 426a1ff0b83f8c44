//! Periodic Emitter
//!
//! `Running --tick--> Running`, `Running --shutdown--> Stopped`. The loop
//! waits only on the next tick or the shutdown signal; a failed emission
//! never ends it.

use std::sync::Arc;
use std::time::Duration;

use shared_bus::PublishFn;
use shared_types::Publication;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::domain::ShutdownListener;
use crate::metrics::{EmissionMetrics, EmissionSite};
use crate::service::emit_status;

/// Lifecycle state of the periodic emitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmitterState {
    Running,
    Stopped,
}

/// Background loop emitting one status event per interval.
pub struct PeriodicEmitter {
    publication: Arc<Publication>,
    interval: Duration,
    publish: PublishFn,
    metrics: Arc<EmissionMetrics>,
}

impl PeriodicEmitter {
    pub fn new(
        publication: Arc<Publication>,
        interval: Duration,
        publish: PublishFn,
        metrics: Arc<EmissionMetrics>,
    ) -> Self {
        Self {
            publication,
            interval,
            publish,
            metrics,
        }
    }

    /// Spawn the loop on the tokio runtime.
    ///
    /// The first tick fires one interval after spawning.
    pub fn spawn(self, shutdown: ShutdownListener) -> EmitterHandle {
        let (state_tx, state_rx) = watch::channel(EmitterState::Running);
        let join = tokio::spawn(self.run(shutdown, state_tx));
        EmitterHandle {
            join,
            state: state_rx,
        }
    }

    async fn run(self, mut shutdown: ShutdownListener, state: watch::Sender<EmitterState>) {
        let Some(first_tick) = Instant::now().checked_add(self.interval) else {
            error!(
                resource = %self.publication.resource,
                interval_secs = self.interval.as_secs(),
                "Event interval out of range, periodic emitter not started"
            );
            state.send_replace(EmitterState::Stopped);
            return;
        };
        let mut ticker = interval_at(first_tick, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            resource = %self.publication.resource,
            interval_ms = self.interval.as_millis() as u64,
            "Periodic emitter running"
        );

        loop {
            tokio::select! {
                biased;

                _ = ticker.tick() => {
                    self.metrics.record_tick();
                    debug!(resource = %self.publication.resource, "Sending events");
                    emit_status(
                        &self.publication,
                        &self.publish,
                        &self.metrics,
                        EmissionSite::Periodic,
                    );
                }
                _ = shutdown.wait() => {
                    info!(
                        resource = %self.publication.resource,
                        "Shutdown observed, periodic emitter stopping"
                    );
                    break;
                }
            }
        }

        drop(ticker);
        state.send_replace(EmitterState::Stopped);
    }
}

/// Completion handle for the periodic emitter task.
pub struct EmitterHandle {
    join: JoinHandle<()>,
    state: watch::Receiver<EmitterState>,
}

impl EmitterHandle {
    /// Current lifecycle state
    pub fn state(&self) -> EmitterState {
        *self.state.borrow()
    }

    pub fn is_stopped(&self) -> bool {
        self.state() == EmitterState::Stopped
    }

    /// Independent watcher of the lifecycle state, usable after the handle
    /// has been consumed by [`EmitterHandle::wait`].
    pub fn watch_state(&self) -> watch::Receiver<EmitterState> {
        self.state.clone()
    }

    /// Wait for the emitter to finish.
    ///
    /// Returns once the loop has observed shutdown and exited.
    pub async fn wait(self) {
        if let Err(e) = self.join.await {
            error!(error = %e, "Periodic emitter task failed");
        }
    }
}
