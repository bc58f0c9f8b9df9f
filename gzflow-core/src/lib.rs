//! # GzFlow Core
//!
//! Core components for the GzFlow streaming compression library.
//!
//! This crate provides the building blocks shared by the engine and the
//! stream adapter:
//!
//! - [`traits`]: the block-engine capability consumed by the stream adapter
//! - [`bitstream`]: LSB-first bit accumulation for variable-length codes
//! - [`crc`]: CRC-32 (ISO 3309) for the gzip trailer
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! GzFlow is layered:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ gzflow-stream                                           │
//! │     CompressionSession, sizing policy, drain loop       │
//! ├─────────────────────────────────────────────────────────┤
//! │ gzflow-deflate                                          │
//! │     DeflateEngine: LZ77 + fixed Huffman, gzip framing   │
//! ├─────────────────────────────────────────────────────────┤
//! │ gzflow-core (this crate)                                │
//! │     BlockEngine trait, BitSink, Crc32, errors           │
//! └─────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod crc;
pub mod error;
pub mod traits;

// Re-exports for convenience
pub use bitstream::BitSink;
pub use crc::Crc32;
pub use error::{GzFlowError, Result};
pub use traits::{BlockEngine, ContainerFormat, FlushMode, StepOutcome};
