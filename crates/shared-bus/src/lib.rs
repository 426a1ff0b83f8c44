//! # Shared Bus - Publish/Subscribe Transport
//!
//! In-memory transport carrying PTP status notifications from the notifier
//! to its consumers, and status requests from consumers back to registered
//! listeners.
//!
//! ```text
//! ┌──────────────┐   PublishFn    ┌──────────────┐   subscribe()   ┌──────────┐
//! │   Notifier   │ ─────────────→ │  Event Bus   │ ──────────────→ │ Consumer │
//! │              │                │              │                 │          │
//! │  Responder   │ ←───────────── │  Listeners   │ ←────────────── │          │
//! └──────────────┘    handle()    └──────────────┘  StatusRequest  └──────────┘
//! ```
//!
//! ## Delivery Contract
//!
//! - `PublishFn` is safe to call concurrently from any number of tasks.
//! - A failed delivery is reported to the caller and never retried here.
//! - Status requests are dispatched on their own tokio task, so a handler
//!   may run concurrently with any other publisher.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod listener;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, StatusRequest};
pub use listener::{HandlerError, StatusListenerRegistry, StatusRequestHandler};
pub use publisher::{DeliveryError, EventPublisher, InMemoryEventBus, PublishFn};
pub use subscriber::{Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
