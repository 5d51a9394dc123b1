//! # GyroCube Hub Test Suite
//!
//! Cross-crate flows exercised through the in-memory broker.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── pipeline.rs     # cloud → ingress → replies/errors
//!     └── simulation.rs   # simulator → broker → cloud, and back into ingress
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p gc-tests
//! cargo test -p gc-tests integration::pipeline
//! ```

pub mod integration;
