//! # Bus Messages
//!
//! Subscription filters for notifications and the inbound status request.

use shared_types::Event;
use uuid::Uuid;

/// An inbound on-demand query asking a publication to emit its status now.
#[derive(Debug, Clone)]
pub struct StatusRequest {
    /// Correlation id of the request.
    pub id: Uuid,
    /// Topic the request targets, e.g. `/cluster/node/ptp/status`.
    pub topic: String,
    /// Event carried by the request, if the requester attached one.
    pub event: Option<Event>,
}

impl StatusRequest {
    /// Create a request for a topic with no carried event.
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            topic: topic.into(),
            event: None,
        }
    }

    /// Attach an event to the request.
    #[must_use]
    pub fn with_event(mut self, event: Event) -> Self {
        self.event = Some(event);
        self
    }
}

/// Filter for subscribing to notifications by resource.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Resource prefixes to include. Empty means all resources.
    pub resources: Vec<String>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for events concerning any of the given resource prefixes.
    #[must_use]
    pub fn resources(resources: Vec<String>) -> Self {
        Self { resources }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        self.resources.is_empty() || self.resources.iter().any(|r| event.concerns(r))
    }
}
