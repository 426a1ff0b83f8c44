//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Publication**: `PublicationId`, `Publication`
//! - **Event**: `Event`, `Data`, `DataValue`, `Value`
//! - **Classification**: `DataType`, `ValueType`, `SyncState`

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::EventError;

/// Event type tag for PTP synchronization status events.
pub const PTP_EVENT_TYPE: &str = "PTP_EVENT";

/// Schema version of the event data envelope.
pub const DATA_SCHEMA_VERSION: &str = "v1";

// =============================================================================
// CLUSTER A: PUBLICATION
// =============================================================================

/// Opaque identity of a registered publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicationId(pub Uuid);

impl PublicationId {
    /// Generate a fresh random identity.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// The nil identity. Never handed out by a registrar.
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl fmt::Display for PublicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered identity + address under which events for one logical
/// resource are emitted.
///
/// Created once by the registrar and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    /// Identity assigned by the registrar.
    pub id: PublicationId,
    /// Hierarchical resource path, e.g. `/cluster/node/ptp`.
    pub resource: String,
    /// Return endpoint URL consumers reply to.
    #[serde(rename = "endpointUri")]
    pub endpoint_uri: String,
}

impl Publication {
    /// Topic under which status requests for this publication arrive.
    #[must_use]
    pub fn status_topic(&self) -> String {
        format!("{}/status", self.resource)
    }
}

// =============================================================================
// CLUSTER B: CLASSIFICATION
// =============================================================================

/// Classification of a data value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    #[serde(rename = "notification")]
    Notification,
    #[serde(rename = "metric")]
    Metric,
}

/// Classification of the carried value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    #[serde(rename = "enumeration")]
    Enumeration,
    #[serde(rename = "decimal64.3")]
    Decimal,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Enumeration => f.write_str("enumeration"),
            ValueType::Decimal => f.write_str("decimal64.3"),
        }
    }
}

/// Synchronization states reported by enumeration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyncState {
    #[serde(rename = "LOCKED")]
    Locked,
    #[serde(rename = "FREERUN")]
    Freerun,
    #[serde(rename = "HOLDOVER")]
    Holdover,
    #[serde(rename = "ACQUIRING-SYNC")]
    AcquiringSync,
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SyncState::Locked => "LOCKED",
            SyncState::Freerun => "FREERUN",
            SyncState::Holdover => "HOLDOVER",
            SyncState::AcquiringSync => "ACQUIRING-SYNC",
        };
        f.write_str(s)
    }
}

// =============================================================================
// CLUSTER C: EVENT
// =============================================================================

/// The value carried by a data value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A synchronization state (value type `enumeration`).
    Enumeration(SyncState),
    /// A numeric reading (value type `decimal64.3`).
    Decimal(f64),
}

impl Value {
    /// The value type this value satisfies.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Enumeration(_) => ValueType::Enumeration,
            Value::Decimal(_) => ValueType::Decimal,
        }
    }
}

/// One point-in-time status value for a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataValue {
    /// Resource path the value describes.
    pub resource: String,
    #[serde(rename = "dataType")]
    pub data_type: DataType,
    #[serde(rename = "valueType")]
    pub value_type: ValueType,
    pub value: Value,
}

/// Versioned envelope of data values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Data {
    /// Schema version (e.g. `v1`).
    pub version: String,
    /// Ordered data values.
    pub values: Vec<DataValue>,
}

/// An immutable notification describing a point-in-time status value.
///
/// Only constructible through [`Event::new`], which validates the envelope.
/// Deserialization runs the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EventRecord")]
pub struct Event {
    /// Unique event id.
    id: String,
    /// Publication this event was emitted under.
    #[serde(rename = "publicationId")]
    publication_id: PublicationId,
    /// Event type tag.
    #[serde(rename = "type")]
    event_type: String,
    /// Creation time.
    time: DateTime<Utc>,
    data: Data,
}

impl Event {
    /// Build a new event, validating the envelope.
    ///
    /// # Errors
    ///
    /// Returns [`EventError`] if the publication id is nil, the type or
    /// version is empty, there are no values, a resource is not absolute,
    /// or a value does not match its declared value type.
    pub fn new(
        publication_id: PublicationId,
        event_type: impl Into<String>,
        data: Data,
    ) -> Result<Self, EventError> {
        let event_type = event_type.into();
        validate_envelope(publication_id, &event_type, &data)?;

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            publication_id,
            event_type,
            time: Utc::now(),
            data,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn publication_id(&self) -> PublicationId {
        self.publication_id
    }

    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    #[must_use]
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    #[must_use]
    pub fn data(&self) -> &Data {
        &self.data
    }

    /// Whether any data value's resource lies under `prefix`.
    #[must_use]
    pub fn concerns(&self, prefix: &str) -> bool {
        self.data
            .values
            .iter()
            .any(|v| v.resource.starts_with(prefix))
    }
}

/// Wire form of [`Event`], checked before it becomes one.
#[derive(Deserialize)]
struct EventRecord {
    id: String,
    #[serde(rename = "publicationId")]
    publication_id: PublicationId,
    #[serde(rename = "type")]
    event_type: String,
    time: DateTime<Utc>,
    data: Data,
}

impl TryFrom<EventRecord> for Event {
    type Error = EventError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        if record.id.is_empty() {
            return Err(EventError::MissingId);
        }
        validate_envelope(record.publication_id, &record.event_type, &record.data)?;

        Ok(Self {
            id: record.id,
            publication_id: record.publication_id,
            event_type: record.event_type,
            time: record.time,
            data: record.data,
        })
    }
}

fn validate_envelope(
    publication_id: PublicationId,
    event_type: &str,
    data: &Data,
) -> Result<(), EventError> {
    if publication_id.is_nil() {
        return Err(EventError::MissingPublication);
    }
    if event_type.is_empty() {
        return Err(EventError::MissingType);
    }
    if data.version.is_empty() {
        return Err(EventError::MissingVersion);
    }
    if data.values.is_empty() {
        return Err(EventError::EmptyData);
    }
    for value in &data.values {
        if !value.resource.starts_with('/') {
            return Err(EventError::InvalidResource(value.resource.clone()));
        }
        let actual = value.value.value_type();
        if actual != value.value_type {
            return Err(EventError::ValueTypeMismatch {
                resource: value.resource.clone(),
                declared: value.value_type.to_string(),
                actual: actual.to_string(),
            });
        }
    }
    Ok(())
}
