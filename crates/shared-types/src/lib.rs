//! # Shared Types Crate
//!
//! Domain entities exchanged between the notifier core and the transport.
//!
//! ## Design Principles
//!
//! - **Immutable Events**: an `Event` is built once, handed to the transport,
//!   and never mutated.
//! - **Validated Construction**: `Event::new` is the only way to build an
//!   event and rejects envelopes the encoder cannot represent.
//! - **Reference, not ownership**: events carry the `PublicationId` of the
//!   publication they were emitted under, never the publication itself.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
