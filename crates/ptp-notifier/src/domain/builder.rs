//! Status event construction
//!
//! Pure: every call returns a fresh event, nothing is cached between calls.

use shared_types::{
    Data, DataType, DataValue, Event, EventError, Publication, SyncState, Value, ValueType,
    DATA_SCHEMA_VERSION, PTP_EVENT_TYPE,
};

/// Build the synchronization status event for a publication.
///
/// The payload is a single `notification` value of type `enumeration`
/// reporting `ACQUIRING-SYNC` for the publication's resource.
pub fn build_status_event(publication: &Publication) -> Result<Event, EventError> {
    let data = Data {
        version: DATA_SCHEMA_VERSION.to_string(),
        values: vec![DataValue {
            resource: publication.resource.clone(),
            data_type: DataType::Notification,
            value_type: ValueType::Enumeration,
            value: Value::Enumeration(SyncState::AcquiringSync),
        }],
    };

    Event::new(publication.id, PTP_EVENT_TYPE, data)
}
