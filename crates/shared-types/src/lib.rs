//! # Shared Types Crate
//!
//! This crate contains the hub-cloud message envelope, the topic/tag
//! taxonomy and the entity value types shared by every hub crate.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every `(kind, topic, tag)` triple is defined
//!   once, in [`taxonomy`], and envelopes derive theirs from it.
//! - **Closed Vocabulary**: topics, tags and payloads are enums, matched
//!   exhaustively wherever they are consumed.
//! - **Topic Is Routing Only**: the topic never reaches the wire.

pub mod entities;
pub mod envelope;
pub mod errors;
pub mod taxonomy;

pub use entities::*;
pub use envelope::{Envelope, Payload};
pub use errors::*;
pub use taxonomy::*;
