//! # Notifier Runtime
//!
//! Process wiring for the PTP notifier. The `main.rs` binary is a thin
//! wrapper around [`NotifierRuntime`].
//!
//! ## Wiring
//!
//! ```text
//!   EmissionCoordinator ──publish──→ InMemoryEventBus ──→ consumer (logs)
//!          │                               │
//!          │ create_publication            │ <resource>/status
//!          ↓                               ↓
//!   InMemoryPublicationRegistrar     StatusResponder
//! ```
//!
//! ## Shutdown Sequence
//!
//! 1. Fire the shutdown signal
//! 2. Wait for the periodic emitter to stop (unbounded)
//! 3. Wait for the consumer task (bounded by `SHUTDOWN_GRACE`)

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use shared_bus::{EventFilter, InMemoryEventBus, StatusListenerRegistry, Subscription};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use ptp_notifier::{
    EmissionCoordinator, EmissionMetrics, EmitterState, InMemoryPublicationRegistrar,
    NotifierConfig, PublicationRegistrar, RunningNotifier, ShutdownListener, ShutdownSignal,
};

/// Upper bound on how long shutdown waits for the consumer task.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// The notifier process: bus, registrar, coordinator and shutdown signal.
pub struct NotifierRuntime {
    bus: Arc<InMemoryEventBus>,
    registrar: Arc<InMemoryPublicationRegistrar>,
    coordinator: EmissionCoordinator,
    shutdown: ShutdownSignal,
    running: Mutex<Option<RunningNotifier>>,
    emitter_state: Mutex<Option<watch::Receiver<EmitterState>>>,
    consumer: Mutex<Option<JoinHandle<()>>>,
}

impl NotifierRuntime {
    pub fn new(config: NotifierConfig) -> Self {
        info!(
            resource = %config.resource_address,
            interval_secs = config.event_interval.as_secs(),
            "Creating PTP notifier runtime"
        );

        let bus = Arc::new(InMemoryEventBus::new());
        let registrar = Arc::new(InMemoryPublicationRegistrar::new());
        let coordinator = EmissionCoordinator::new(
            config,
            Arc::clone(&registrar) as Arc<dyn PublicationRegistrar>,
            Arc::clone(&bus) as Arc<dyn StatusListenerRegistry>,
        );

        Self {
            bus,
            registrar,
            coordinator,
            shutdown: ShutdownSignal::new(),
            running: Mutex::new(None),
            emitter_state: Mutex::new(None),
            consumer: Mutex::new(None),
        }
    }

    /// Start the consumer and the notifier.
    ///
    /// The consumer subscribes before the coordinator runs so the immediate
    /// startup event has a receiver.
    pub async fn start(&self) -> Result<()> {
        info!("===========================================");
        info!("  PTP Notifier Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let subscription = self.bus.subscribe(EventFilter::all());
        let consumer = tokio::spawn(consume(subscription, self.shutdown.listener()));

        let running = match self
            .coordinator
            .start(self.shutdown.listener(), self.bus.publish_fn())
            .await
        {
            Ok(running) => running,
            Err(e) => {
                consumer.abort();
                return Err(e).context("Failed to start PTP notifier");
            }
        };

        info!(
            publication_id = %running.publication().id,
            status_topic = %running.publication().status_topic(),
            "PTP notifier running"
        );
        *self.emitter_state.lock() = Some(running.emitter().watch_state());
        *self.running.lock() = Some(running);
        *self.consumer.lock() = Some(consumer);
        Ok(())
    }

    /// Shut the notifier down gracefully.
    ///
    /// Returns only after the periodic emitter has stopped; a delivery that
    /// never returns keeps this waiting.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");
        if !self.shutdown.fire() {
            debug!("Shutdown already signalled");
        }

        let running = self.running.lock().take();
        if let Some(running) = running {
            running.wait().await;
        }

        let consumer = self.consumer.lock().take();
        if let Some(consumer) = consumer {
            match timeout(SHUTDOWN_GRACE, consumer).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(error = %e, "Consumer task failed"),
                Err(_) => warn!("Consumer did not stop within grace period"),
            }
        }

        let snapshot = self.coordinator.metrics().snapshot();
        info!(
            emitted = snapshot.total_emitted(),
            failures = snapshot.total_failures(),
            "Shutdown complete"
        );
    }

    pub fn bus(&self) -> Arc<InMemoryEventBus> {
        Arc::clone(&self.bus)
    }

    pub fn registrar(&self) -> Arc<InMemoryPublicationRegistrar> {
        Arc::clone(&self.registrar)
    }

    pub fn metrics(&self) -> Arc<EmissionMetrics> {
        self.coordinator.metrics()
    }

    pub fn is_running(&self) -> bool {
        self.running.lock().is_some()
    }

    /// Lifecycle state of the periodic emitter, once started
    pub fn emitter_state(&self) -> Option<EmitterState> {
        self.emitter_state.lock().as_ref().map(|rx| *rx.borrow())
    }
}

/// Log every delivered notification until shutdown.
async fn consume(mut subscription: Subscription, mut shutdown: ShutdownListener) {
    loop {
        tokio::select! {
            event = subscription.recv() => match event {
                Some(event) => {
                    let state = event.data().values.first().map(|v| v.value);
                    info!(
                        event_id = %event.id(),
                        publication_id = %event.publication_id(),
                        time = %event.time(),
                        state = ?state,
                        "Notification delivered"
                    );
                }
                None => break,
            },
            _ = shutdown.wait() => break,
        }
    }
    debug!("Notification consumer stopped");
}
