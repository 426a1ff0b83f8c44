//! Outbound Ports (Driven Ports)

use async_trait::async_trait;
use shared_types::Publication;

use crate::error::RegistrarError;

/// Request to register a publication.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicationRequest {
    /// Resource address, e.g. `/cluster/node/ptp`
    pub resource: String,
    /// Return endpoint URL
    pub endpoint_uri: String,
}

/// Maps a resource address to a publication identity (Driven Port)
///
/// Implementations must be idempotent per address: a second request for the
/// same resource returns the existing publication or a harmless duplicate.
#[async_trait]
pub trait PublicationRegistrar: Send + Sync {
    /// Create (or look up) the publication for a resource
    async fn create_publication(
        &self,
        request: PublicationRequest,
    ) -> Result<Publication, RegistrarError>;
}
