//! # GzFlow Stream
//!
//! Turns GzFlow's block-oriented compression engine into an incremental
//! stream compressor: callers feed data in arbitrary-sized fragments and
//! receive compressed output appended to their buffer in bounded-size chunks.
//!
//! The adapter guarantees the engine's semantics end to end: every fragment
//! is fully consumed before a flush, the output chunk buffer is never
//! overrun, and every flush boundary is a valid decoder-synchronization
//! point.
//!
//! ## Example
//!
//! ```rust
//! use gzflow_deflate::DeflateEngine;
//! use gzflow_stream::{CompressionSession, CompressionTier, FlushRequest, SegmentedBuffer};
//!
//! let mut session = CompressionSession::new(DeflateEngine::new());
//! session.init(CompressionTier::Balanced, 15, 3).unwrap();
//!
//! let mut input = SegmentedBuffer::new();
//! input.push_segment(b"Hello, ".to_vec());
//! input.push_segment(b"World!".to_vec());
//!
//! let mut compressed = Vec::new();
//! session
//!     .compress(&mut input, &mut compressed, FlushRequest::Finish)
//!     .unwrap();
//! assert!(input.is_empty());
//! assert!(!compressed.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod buffer;
pub mod session;
pub mod sizing;

// Re-exports
pub use buffer::{FragmentSource, OutputSink, SegmentedBuffer};
pub use session::{CompressionSession, CompressionTier, FlushRequest};
pub use sizing::{required_scratch_size, ScratchPolicy};
