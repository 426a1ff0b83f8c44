//! # PTP Notifier
//!
//! Status event source for a node's PTP clock-synchronization state. Emits a
//! status event once at startup, then once per interval, and on demand
//! whenever a status request arrives on `<resource>/status`.
//!
//! ## Architecture
//!
//! Hexagonal layout (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): no I/O
//!   - `NotifierConfig`: resource address, base URL, interval
//!   - `build_status_event`: the single event builder
//!   - `ShutdownSignal` / `ShutdownListener`: fire-once broadcast
//!
//! - **Ports Layer** (`ports/`)
//!   - `PublicationRegistrar`: driven port for publication creation
//!
//! - **Service Layer** (`service/`)
//!   - `EmissionCoordinator`: startup sequence
//!   - `PeriodicEmitter`: tick loop, returns an `EmitterHandle`
//!   - `StatusResponder`: on-demand handler
//!
//! - **Adapters Layer** (`adapters/`)
//!   - `InMemoryPublicationRegistrar`
//!
//! Delivery and status-listener registration go through `shared-bus`
//! (`PublishFn`, `StatusListenerRegistry`).
//!
//! ## Failure Policy
//!
//! - Publication creation failure aborts `start`; nothing else runs.
//! - Any emission failure (build or delivery) is logged at `warn` and
//!   counted in `EmissionMetrics`. Never retried, never fatal.
//!
//! ## Usage Example
//!
//! ```ignore
//! use ptp_notifier::{
//!     EmissionCoordinator, InMemoryPublicationRegistrar, NotifierConfig, ShutdownSignal,
//! };
//! use shared_bus::InMemoryEventBus;
//! use std::sync::Arc;
//!
//! let bus = Arc::new(InMemoryEventBus::new());
//! let coordinator = EmissionCoordinator::new(
//!     NotifierConfig::default(),
//!     Arc::new(InMemoryPublicationRegistrar::new()),
//!     bus.clone(),
//! );
//!
//! let shutdown = ShutdownSignal::new();
//! let running = coordinator.start(shutdown.listener(), bus.publish_fn()).await?;
//!
//! // ... later
//! shutdown.fire();
//! running.wait().await;
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::InMemoryPublicationRegistrar;
pub use domain::{
    build_status_event, NotifierConfig, ShutdownListener, ShutdownSignal, DEFAULT_BASE_URL,
    DEFAULT_EVENT_INTERVAL, DEFAULT_RESOURCE_ADDRESS,
};
pub use error::{ConfigError, EmitError, NotifierError, RegistrarError};
pub use metrics::{EmissionMetrics, EmissionSite, MetricsSnapshot};
pub use ports::{PublicationRegistrar, PublicationRequest};
pub use service::{
    try_emit, EmissionCoordinator, EmitterHandle, EmitterState, PeriodicEmitter,
    RunningNotifier, StatusResponder,
};
