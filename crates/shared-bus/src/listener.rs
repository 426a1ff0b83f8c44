//! # Status Listeners
//!
//! Registration boundary for on-demand status requests. A listener binds a
//! topic to an optional handler and a fallback delivery function; inbound
//! requests for the topic are dispatched on their own tokio task.

use crate::events::StatusRequest;
use crate::publisher::{InMemoryEventBus, PublishFn};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Errors a status handler may report back to the transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandlerError {
    #[error("Malformed status request: {0}")]
    Malformed(String),
}

/// Capability invoked for each inbound status request on a topic.
pub trait StatusRequestHandler: Send + Sync {
    /// Handle one request.
    ///
    /// # Errors
    ///
    /// [`HandlerError`] if the transport should treat the request as failed.
    fn handle(&self, request: &StatusRequest) -> Result<(), HandlerError>;
}

/// Registration boundary for status listeners.
pub trait StatusListenerRegistry: Send + Sync {
    /// Bind `topic` to a handler.
    ///
    /// When `handler` is `None`, the event carried by each request is
    /// forwarded to `fallback` instead. Registering a topic again replaces
    /// the previous listener.
    fn register_status_listener(
        &self,
        topic: &str,
        handler: Option<Arc<dyn StatusRequestHandler>>,
        fallback: PublishFn,
    );
}

/// A registered listener.
#[derive(Clone)]
pub(crate) struct StatusListener {
    handler: Option<Arc<dyn StatusRequestHandler>>,
    fallback: PublishFn,
}

impl StatusListener {
    fn dispatch(&self, request: &StatusRequest) {
        if let Some(handler) = &self.handler {
            if let Err(e) = handler.handle(request) {
                warn!(
                    request_id = %request.id,
                    topic = %request.topic,
                    error = %e,
                    "Status handler failed"
                );
            }
            return;
        }

        match &request.event {
            Some(event) => {
                if let Err(e) = (self.fallback)(event.clone()) {
                    warn!(
                        request_id = %request.id,
                        topic = %request.topic,
                        error = %e,
                        "Fallback delivery failed"
                    );
                }
            }
            None => {
                debug!(request_id = %request.id, "Status request carries no event to forward");
            }
        }
    }
}

impl StatusListenerRegistry for InMemoryEventBus {
    fn register_status_listener(
        &self,
        topic: &str,
        handler: Option<Arc<dyn StatusRequestHandler>>,
        fallback: PublishFn,
    ) {
        let replaced = self
            .listeners
            .write()
            .insert(topic.to_string(), StatusListener { handler, fallback })
            .is_some();

        debug!(topic = %topic, replaced, "Status listener registered");
    }
}

impl InMemoryEventBus {
    /// Dispatch an inbound status request to the listener for its topic.
    ///
    /// Must be called from within a tokio runtime. Returns the handle of the
    /// task running the listener, or `None` if no listener is registered.
    pub fn dispatch_status_request(&self, request: StatusRequest) -> Option<JoinHandle<()>> {
        let listener = self.listeners.read().get(&request.topic).cloned();

        let Some(listener) = listener else {
            warn!(
                topic = %request.topic,
                request_id = %request.id,
                "No listener for status request"
            );
            return None;
        };

        debug!(topic = %request.topic, request_id = %request.id, "Dispatching status request");
        Some(tokio::spawn(async move {
            listener.dispatch(&request);
        }))
    }

    /// Number of registered status listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Whether a listener is registered for `topic`.
    #[must_use]
    pub fn has_listener(&self, topic: &str) -> bool {
        self.listeners.read().contains_key(topic)
    }
}
