//! # Error Types
//!
//! Errors raised while constructing events.

use thiserror::Error;

/// Reasons an event envelope is rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// The event id is empty.
    #[error("Event has no id")]
    MissingId,

    /// The publication reference is empty.
    #[error("Event has no publication id")]
    MissingPublication,

    /// The event type tag is empty.
    #[error("Event type must not be empty")]
    MissingType,

    /// The data envelope has no schema version.
    #[error("Event data must carry a schema version")]
    MissingVersion,

    /// The data envelope carries no values.
    #[error("Event data must carry at least one value")]
    EmptyData,

    /// A data value's resource is not an absolute path.
    #[error("Invalid resource address: {0:?} (must start with '/')")]
    InvalidResource(String),

    /// A data value does not match its declared value type.
    #[error("Value type mismatch for {resource}: declared {declared}, got {actual}")]
    ValueTypeMismatch {
        resource: String,
        declared: String,
        actual: String,
    },
}
