//! Domain Layer
//!
//! Pure logic with no transport I/O: configuration, event construction,
//! and the shutdown signal.

pub mod builder;
pub mod config;
pub mod shutdown;

pub use builder::build_status_event;
pub use config::{
    NotifierConfig, DEFAULT_BASE_URL, DEFAULT_EVENT_INTERVAL, DEFAULT_RESOURCE_ADDRESS,
    MAX_EVENT_INTERVAL, RETURN_PATH,
};
pub use shutdown::{ShutdownListener, ShutdownSignal};
