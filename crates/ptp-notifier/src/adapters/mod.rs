//! Adapters Layer (Driven Adapters)
//!
//! - `InMemoryPublicationRegistrar` - process-local registrar, idempotent
//!   per resource address

pub mod registrar;

pub use registrar::InMemoryPublicationRegistrar;
