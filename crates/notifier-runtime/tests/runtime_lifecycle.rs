//! # Runtime Lifecycle Tests
//!
//! Drives `NotifierRuntime` through start, status requests and shutdown on a
//! paused clock, observing events from an extra bus subscriber.

use std::time::Duration;

use notifier_runtime::NotifierRuntime;
use ptp_notifier::NotifierConfig;
use shared_bus::{EventFilter, StatusRequest};
use shared_types::{SyncState, Value};
use tokio::time::sleep;

fn config() -> NotifierConfig {
    NotifierConfig::default()
        .with_resource_address("/cluster/node/ptp")
        .with_event_interval(Duration::from_secs(5))
}

#[tokio::test(start_paused = true)]
async fn test_runtime_emits_until_shutdown() {
    let runtime = NotifierRuntime::new(config());
    let mut observer = runtime.bus().subscribe(EventFilter::all());

    runtime.start().await.unwrap();
    sleep(Duration::from_secs(11)).await;
    runtime.shutdown().await;

    let events = observer.drain();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| {
        e.data().values[0].value == Value::Enumeration(SyncState::AcquiringSync)
    }));

    sleep(Duration::from_secs(20)).await;
    assert!(observer.drain().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_status_request_answered_through_bus() {
    let runtime = NotifierRuntime::new(config());
    let bus = runtime.bus();
    let mut observer = bus.subscribe(EventFilter::resources(vec![
        "/cluster/node/ptp".to_string(),
    ]));

    runtime.start().await.unwrap();
    observer.drain();

    bus.dispatch_status_request(StatusRequest::new("/cluster/node/ptp/status"))
        .expect("status listener registered")
        .await
        .unwrap();

    let response = observer.try_recv().unwrap().expect("status event");
    assert_eq!(response.event_type(), "PTP_EVENT");
    assert_eq!(runtime.metrics().snapshot().status_emitted, 1);

    runtime.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_second_shutdown_is_harmless() {
    let runtime = NotifierRuntime::new(config());
    runtime.start().await.unwrap();

    runtime.shutdown().await;
    runtime.shutdown().await;
    assert!(!runtime.is_running());
}
