//! In-memory publication registrar
//!
//! Stands in for the event proxy's publisher REST endpoint when the notifier
//! runs against the in-process bus.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{Publication, PublicationId};
use tracing::debug;

use crate::error::RegistrarError;
use crate::ports::{PublicationRegistrar, PublicationRequest};

/// Registrar keeping publications in a map keyed by resource address.
#[derive(Default)]
pub struct InMemoryPublicationRegistrar {
    publications: RwLock<HashMap<String, Publication>>,
}

impl InMemoryPublicationRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the publication for a resource
    pub fn get(&self, resource: &str) -> Option<Publication> {
        self.publications.read().get(resource).cloned()
    }

    pub fn publication_count(&self) -> usize {
        self.publications.read().len()
    }
}

#[async_trait]
impl PublicationRegistrar for InMemoryPublicationRegistrar {
    async fn create_publication(
        &self,
        request: PublicationRequest,
    ) -> Result<Publication, RegistrarError> {
        if !request.resource.starts_with('/') {
            return Err(RegistrarError::InvalidRequest(format!(
                "resource {:?} is not an absolute path",
                request.resource
            )));
        }
        if request.endpoint_uri.is_empty() {
            return Err(RegistrarError::InvalidRequest(
                "endpoint uri is empty".to_string(),
            ));
        }

        let mut publications = self.publications.write();
        if let Some(existing) = publications.get(&request.resource) {
            debug!(resource = %request.resource, id = %existing.id, "Publication already exists");
            return Ok(existing.clone());
        }

        let publication = Publication {
            id: PublicationId::new_v4(),
            resource: request.resource.clone(),
            endpoint_uri: request.endpoint_uri,
        };
        publications.insert(request.resource, publication.clone());
        debug!(resource = %publication.resource, id = %publication.id, "Publication created");

        Ok(publication)
    }
}
