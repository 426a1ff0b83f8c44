//! Status Responder
//!
//! Registered with the transport for `<resource>/status`. Each inbound
//! request produces exactly one freshly built event; the request payload is
//! ignored and the transport always sees success.

use std::sync::Arc;

use shared_bus::{HandlerError, PublishFn, StatusRequest, StatusRequestHandler};
use shared_types::Publication;
use tracing::info;

use crate::metrics::{EmissionMetrics, EmissionSite};
use crate::service::emit_status;

/// On-demand status handler for one publication.
pub struct StatusResponder {
    publication: Arc<Publication>,
    publish: PublishFn,
    metrics: Arc<EmissionMetrics>,
}

impl StatusResponder {
    pub fn new(
        publication: Arc<Publication>,
        publish: PublishFn,
        metrics: Arc<EmissionMetrics>,
    ) -> Self {
        Self {
            publication,
            publish,
            metrics,
        }
    }

    /// Topic this responder should be registered under
    pub fn topic(&self) -> String {
        self.publication.status_topic()
    }
}

impl StatusRequestHandler for StatusResponder {
    fn handle(&self, request: &StatusRequest) -> Result<(), HandlerError> {
        info!(
            request_id = %request.id,
            publication_id = %self.publication.id,
            "Got status check call, firing event"
        );
        emit_status(
            &self.publication,
            &self.publish,
            &self.metrics,
            EmissionSite::StatusRequest,
        );
        Ok(())
    }
}
