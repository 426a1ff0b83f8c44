//! Emission Coordinator
//!
//! ## Startup Sequence
//!
//! 1. Create the publication via the registrar (only fatal step)
//! 2. Register the status responder under `<resource>/status`
//! 3. Emit one event immediately (failure logged, not fatal)
//! 4. Spawn the periodic emitter and return without waiting on it

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use shared_bus::{PublishFn, StatusListenerRegistry, StatusRequestHandler};
use shared_types::Publication;
use tracing::{error, info};

use crate::domain::{NotifierConfig, ShutdownListener};
use crate::error::{NotifierError, RegistrarError};
use crate::metrics::{EmissionMetrics, EmissionSite};
use crate::ports::{PublicationRegistrar, PublicationRequest};
use crate::service::emitter::{EmitterHandle, PeriodicEmitter};
use crate::service::responder::StatusResponder;
use crate::service::emit_status;

/// Owns the startup sequence of the notifier.
pub struct EmissionCoordinator {
    config: NotifierConfig,
    registrar: Arc<dyn PublicationRegistrar>,
    listeners: Arc<dyn StatusListenerRegistry>,
    metrics: Arc<EmissionMetrics>,
    started: AtomicBool,
}

impl EmissionCoordinator {
    pub fn new(
        config: NotifierConfig,
        registrar: Arc<dyn PublicationRegistrar>,
        listeners: Arc<dyn StatusListenerRegistry>,
    ) -> Self {
        Self {
            config,
            registrar,
            listeners,
            metrics: Arc::new(EmissionMetrics::new()),
            started: AtomicBool::new(false),
        }
    }

    /// Share an existing metrics collector
    pub fn with_metrics(mut self, metrics: Arc<EmissionMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    pub fn metrics(&self) -> Arc<EmissionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Run the startup sequence and hand off to the periodic emitter.
    ///
    /// Only a registration (or configuration) failure is returned; in that
    /// case nothing was registered, emitted, or spawned. May succeed at most
    /// once per coordinator.
    pub async fn start(
        &self,
        shutdown: ShutdownListener,
        publish: PublishFn,
    ) -> Result<RunningNotifier, NotifierError> {
        if self
            .started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(NotifierError::AlreadyStarted);
        }

        let publication = match self.prepare().await {
            Ok(publication) => Arc::new(publication),
            Err(e) => {
                self.started.store(false, Ordering::SeqCst);
                return Err(e);
            }
        };
        info!(
            publication_id = %publication.id,
            resource = %publication.resource,
            endpoint = %publication.endpoint_uri,
            "Created publisher"
        );

        let responder = StatusResponder::new(
            Arc::clone(&publication),
            Arc::clone(&publish),
            Arc::clone(&self.metrics),
        );
        let topic = responder.topic();
        let handler: Arc<dyn StatusRequestHandler> = Arc::new(responder);
        self.listeners
            .register_status_listener(&topic, Some(handler), Arc::clone(&publish));
        info!(topic = %topic, "Status listener registered");

        info!(resource = %publication.resource, "Sending initial event");
        emit_status(&publication, &publish, &self.metrics, EmissionSite::Startup);

        info!(resource = %publication.resource, "Spinning event loop");
        let emitter = PeriodicEmitter::new(
            Arc::clone(&publication),
            self.config.event_interval,
            publish,
            Arc::clone(&self.metrics),
        )
        .spawn(shutdown);

        Ok(RunningNotifier {
            publication,
            emitter,
        })
    }

    async fn prepare(&self) -> Result<Publication, NotifierError> {
        if let Err(e) = self.config.validate() {
            error!(error = %e, "Invalid notifier configuration");
            return Err(e.into());
        }

        self.create_publication().await.map_err(|e| {
            error!(
                resource = %self.config.resource_address,
                error = %e,
                "Failed to create a publisher"
            );
            NotifierError::from(e)
        })
    }

    async fn create_publication(&self) -> Result<Publication, RegistrarError> {
        let request = PublicationRequest {
            resource: self.config.resource_address.clone(),
            endpoint_uri: self.config.return_url(),
        };
        self.registrar.create_publication(request).await
    }
}

/// A started notifier: the publication plus the emitter completion handle.
pub struct RunningNotifier {
    publication: Arc<Publication>,
    emitter: EmitterHandle,
}

impl RunningNotifier {
    pub fn publication(&self) -> &Publication {
        &self.publication
    }

    pub fn emitter(&self) -> &EmitterHandle {
        &self.emitter
    }

    /// Wait for the periodic emitter to finish after shutdown fires.
    pub async fn wait(self) {
        self.emitter.wait().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryPublicationRegistrar;
    use crate::domain::ShutdownSignal;
    use crate::error::ConfigError;
    use async_trait::async_trait;
    use shared_bus::{EventFilter, InMemoryEventBus, StatusRequest};
    use std::time::Duration;

    struct UnavailableRegistrar;

    #[async_trait]
    impl PublicationRegistrar for UnavailableRegistrar {
        async fn create_publication(
            &self,
            _request: PublicationRequest,
        ) -> Result<Publication, RegistrarError> {
            Err(RegistrarError::Unavailable("connection refused".to_string()))
        }
    }

    fn coordinator(
        bus: &Arc<InMemoryEventBus>,
        registrar: Arc<dyn PublicationRegistrar>,
    ) -> EmissionCoordinator {
        EmissionCoordinator::new(
            NotifierConfig::default(),
            registrar,
            Arc::clone(bus) as Arc<dyn StatusListenerRegistry>,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_registers_and_emits_immediately() {
        let bus = Arc::new(InMemoryEventBus::new());
        let mut sub = bus.subscribe(EventFilter::all());
        let registrar = Arc::new(InMemoryPublicationRegistrar::new());
        let coordinator = coordinator(&bus, registrar.clone());
        let signal = ShutdownSignal::new();

        let running = coordinator
            .start(signal.listener(), bus.publish_fn())
            .await
            .unwrap();

        assert_eq!(registrar.publication_count(), 1);
        assert!(bus.has_listener("/cluster/node/ptp/status"));
        assert_eq!(running.publication().resource, "/cluster/node/ptp");
        assert_eq!(
            running.publication().endpoint_uri,
            "http://localhost:8080/api/ocloudNotifications/v1/dummy"
        );

        let initial = sub.try_recv().unwrap().expect("immediate event");
        assert_eq!(initial.publication_id(), running.publication().id);
        assert_eq!(coordinator.metrics().snapshot().startup_emitted, 1);

        signal.fire();
        running.wait().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_registration_failure_is_fatal_and_leaks_nothing() {
        let bus = Arc::new(InMemoryEventBus::new());
        let mut sub = bus.subscribe(EventFilter::all());
        let coordinator = coordinator(&bus, Arc::new(UnavailableRegistrar));
        let signal = ShutdownSignal::new();

        let result = coordinator.start(signal.listener(), bus.publish_fn()).await;
        assert!(matches!(
            result,
            Err(NotifierError::Registration(RegistrarError::Unavailable(_)))
        ));
        assert_eq!(bus.listener_count(), 0);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(sub.drain().is_empty());
        assert_eq!(coordinator.metrics().snapshot().ticks, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_config_rejected() {
        let bus = Arc::new(InMemoryEventBus::new());
        let coordinator = EmissionCoordinator::new(
            NotifierConfig::default().with_event_interval(Duration::ZERO),
            Arc::new(InMemoryPublicationRegistrar::new()),
            Arc::clone(&bus) as Arc<dyn StatusListenerRegistry>,
        );

        let result = coordinator
            .start(ShutdownSignal::new().listener(), bus.publish_fn())
            .await;
        assert!(matches!(result, Err(NotifierError::Config(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_oversized_interval_rejected_before_registration() {
        let bus = Arc::new(InMemoryEventBus::new());
        let mut sub = bus.subscribe(EventFilter::all());
        let registrar = Arc::new(InMemoryPublicationRegistrar::new());
        let coordinator = EmissionCoordinator::new(
            NotifierConfig::default().with_event_interval(Duration::from_secs(u64::MAX)),
            registrar.clone(),
            Arc::clone(&bus) as Arc<dyn StatusListenerRegistry>,
        );

        let result = coordinator
            .start(ShutdownSignal::new().listener(), bus.publish_fn())
            .await;
        assert!(matches!(
            result,
            Err(NotifierError::Config(ConfigError::IntervalTooLarge { .. }))
        ));
        assert_eq!(registrar.publication_count(), 0);
        assert!(sub.drain().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_delivery_failure_not_fatal() {
        let bus = Arc::new(InMemoryEventBus::new());
        // No subscriber: every delivery fails with NoSubscribers
        let coordinator = coordinator(&bus, Arc::new(InMemoryPublicationRegistrar::new()));
        let signal = ShutdownSignal::new();

        let running = coordinator
            .start(signal.listener(), bus.publish_fn())
            .await
            .expect("delivery failure must not abort startup");

        let snapshot = coordinator.metrics().snapshot();
        assert_eq!(snapshot.startup_emitted, 0);
        assert_eq!(snapshot.delivery_failures, 1);

        signal.fire();
        running.wait().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_rejected() {
        let bus = Arc::new(InMemoryEventBus::new());
        let _sub = bus.subscribe(EventFilter::all());
        let coordinator = coordinator(&bus, Arc::new(InMemoryPublicationRegistrar::new()));
        let signal = ShutdownSignal::new();

        let running = coordinator
            .start(signal.listener(), bus.publish_fn())
            .await
            .unwrap();
        let again = coordinator.start(signal.listener(), bus.publish_fn()).await;
        assert!(matches!(again, Err(NotifierError::AlreadyStarted)));

        signal.fire();
        running.wait().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_request_routed_to_responder() {
        let bus = Arc::new(InMemoryEventBus::new());
        let mut sub = bus.subscribe(EventFilter::all());
        let coordinator = coordinator(&bus, Arc::new(InMemoryPublicationRegistrar::new()));
        let signal = ShutdownSignal::new();

        let running = coordinator
            .start(signal.listener(), bus.publish_fn())
            .await
            .unwrap();
        sub.drain();

        bus.dispatch_status_request(StatusRequest::new("/cluster/node/ptp/status"))
            .unwrap()
            .await
            .unwrap();

        let response = sub.try_recv().unwrap().expect("status response");
        assert_eq!(response.publication_id(), running.publication().id);
        assert_eq!(coordinator.metrics().snapshot().status_emitted, 1);

        signal.fire();
        running.wait().await;
    }
}
