//! Ports Layer
//!
//! Driven ports the notifier depends on. The status-listener and delivery
//! boundaries live in `shared-bus`; the registrar is defined here.

pub mod outbound;

pub use outbound::{PublicationRegistrar, PublicationRequest};
