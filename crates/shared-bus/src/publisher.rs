//! # Event Publisher
//!
//! Defines the publishing side of the event bus.

use crate::events::EventFilter;
use crate::listener::StatusListener;
use crate::subscriber::Subscription;
use crate::DEFAULT_CHANNEL_CAPACITY;
use parking_lot::RwLock;
use shared_types::Event;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Errors from handing an event to the transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// Nobody is subscribed; the event was dropped.
    #[error("No subscribers for event {event_id}")]
    NoSubscribers { event_id: String },

    /// The delivery target refused the event.
    #[error("Delivery rejected: {0}")]
    Rejected(String),
}

/// Delivery function shared by every emission site.
///
/// Must be safe to call concurrently from multiple tasks.
pub type PublishFn = Arc<dyn Fn(Event) -> Result<(), DeliveryError> + Send + Sync>;

/// Trait for publishing events to the bus.
pub trait EventPublisher: Send + Sync {
    /// Publish an event to the bus.
    ///
    /// # Returns
    ///
    /// The number of active subscribers that received the event.
    ///
    /// # Errors
    ///
    /// [`DeliveryError::NoSubscribers`] when the event reached nobody.
    fn publish(&self, event: Event) -> Result<usize, DeliveryError>;

    /// Get the total number of publish attempts.
    fn events_published(&self) -> u64;
}

/// In-memory implementation of the event bus.
///
/// Uses `tokio::sync::broadcast` for multi-producer, multi-consumer semantics.
/// Suitable for single-node operation; a deployment talking to a message
/// broker would implement the same traits over its client.
pub struct InMemoryEventBus {
    /// Broadcast sender for events.
    sender: broadcast::Sender<Event>,

    /// Status listeners by topic.
    pub(crate) listeners: RwLock<HashMap<String, StatusListener>>,

    /// Total publish attempts.
    events_published: AtomicU64,

    /// Channel capacity.
    capacity: usize,
}

impl InMemoryEventBus {
    /// Create a new in-memory event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new in-memory event bus with specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            listeners: RwLock::new(HashMap::new()),
            events_published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Subscribe to events matching a filter.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        let receiver = self.sender.subscribe();
        debug!(resources = ?filter.resources, "New subscription created");
        Subscription::new(receiver, filter)
    }

    /// A delivery function that publishes onto this bus.
    #[must_use]
    pub fn publish_fn(self: &Arc<Self>) -> PublishFn {
        let bus = Arc::clone(self);
        Arc::new(move |event| bus.publish(event).map(|_| ()))
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Get the channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for InMemoryEventBus {
    fn publish(&self, event: Event) -> Result<usize, DeliveryError> {
        let event_id = event.id().to_string();
        let publication_id = event.publication_id();

        // Always increment counter (event was attempted)
        self.events_published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(event) {
            Ok(receiver_count) => {
                debug!(
                    event_id = %event_id,
                    publication_id = %publication_id,
                    receivers = receiver_count,
                    "Event published"
                );
                Ok(receiver_count)
            }
            Err(_) => {
                warn!(
                    event_id = %event_id,
                    publication_id = %publication_id,
                    "Event dropped (no receivers)"
                );
                Err(DeliveryError::NoSubscribers { event_id })
            }
        }
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}
