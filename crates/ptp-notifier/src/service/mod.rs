//! Service Layer
//!
//! - `EmissionCoordinator`: startup sequence and hand-off
//! - `PeriodicEmitter`: background tick loop
//! - `StatusResponder`: on-demand status handler
//!
//! All three emit through [`emit_status`], which shares one failure policy:
//! build or delivery errors are logged and counted, never retried, never
//! escalated.

pub mod coordinator;
pub mod emitter;
pub mod responder;

pub use coordinator::{EmissionCoordinator, RunningNotifier};
pub use emitter::{EmitterHandle, EmitterState, PeriodicEmitter};
pub use responder::StatusResponder;

use shared_bus::PublishFn;
use shared_types::Publication;
use tracing::{debug, warn};

use crate::domain::build_status_event;
use crate::error::EmitError;
use crate::metrics::{EmissionMetrics, EmissionSite};

/// Build one status event and hand it to the delivery function.
pub fn try_emit(publication: &Publication, publish: &PublishFn) -> Result<(), EmitError> {
    let event = build_status_event(publication)?;
    publish(event)?;
    Ok(())
}

/// Emit one status event, absorbing any failure.
///
/// Returns whether the event was delivered.
pub(crate) fn emit_status(
    publication: &Publication,
    publish: &PublishFn,
    metrics: &EmissionMetrics,
    site: EmissionSite,
) -> bool {
    match try_emit(publication, publish) {
        Ok(()) => {
            metrics.record_success(site);
            debug!(
                resource = %publication.resource,
                publication_id = %publication.id,
                site = %site,
                "Status event emitted"
            );
            true
        }
        Err(e) => {
            metrics.record_failure(&e);
            warn!(
                resource = %publication.resource,
                publication_id = %publication.id,
                site = %site,
                error = %e,
                "Status event not delivered"
            );
            false
        }
    }
}
