//! # GzFlow Deflate
//!
//! The block-oriented compression engine behind GzFlow's stream adapter.
//!
//! [`DeflateEngine`] implements the [`BlockEngine`](gzflow_core::BlockEngine)
//! capability: it consumes bounded input regions, accumulates them into a
//! working segment, emits deflate blocks (RFC 1951, fixed Huffman codes and
//! stored blocks) wrapped in gzip framing (RFC 1952), and delivers compressed
//! bytes into bounded output regions under the cursor/remaining-count step
//! contract.
//!
//! ## Example
//!
//! ```rust
//! use gzflow_core::{BlockEngine, ContainerFormat, FlushMode};
//! use gzflow_deflate::DeflateEngine;
//!
//! let mut engine = DeflateEngine::new();
//! engine.reset(ContainerFormat::Gzip, 15, 2);
//!
//! let mut out = [0u8; 256];
//! let outcome = engine
//!     .step(b"Hello, World!", &mut out, FlushMode::Finish, true)
//!     .unwrap();
//! assert_eq!(outcome.consumed, 13);
//! assert!(outcome.produced > 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod block;
pub mod engine;
pub mod matcher;
pub mod tables;

// Re-exports
pub use block::{write_fixed, write_stored};
pub use engine::DeflateEngine;
pub use matcher::{Matcher, Token};
