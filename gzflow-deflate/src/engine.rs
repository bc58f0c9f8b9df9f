//! The block engine: gzip framing over segment-at-a-time deflate.
//!
//! The engine accumulates input into a scratch-backed segment. A full segment
//! is emitted as one non-final deflate block; flush requests emit whatever is
//! pending plus the appropriate boundary (sync marker or final block and
//! trailer). Compressed bits queue in an internal sink and are delivered into
//! the caller's output region by each step, so unconsumed input can only
//! coexist with a completely full output region.

use crate::block::{write_fixed, write_stored};
use crate::matcher::{Matcher, Token, MAX_WINDOW};
use gzflow_core::error::Result;
use gzflow_core::{BitSink, BlockEngine, ContainerFormat, Crc32, FlushMode, StepOutcome};

/// Segment capacity used when no scratch buffer has been attached.
const DEFAULT_SEGMENT_CAPACITY: usize = 64 * 1024;

/// Smallest segment capacity the engine will operate with; a scratch buffer
/// below this is still usable but is rounded up so every step makes progress.
const MIN_SEGMENT_CAPACITY: usize = 256;

/// gzip header: magic, CM=8 (deflate), no flags, zero mtime, XFL, OS=255.
fn gzip_header(level: u8) -> [u8; 10] {
    let xfl = match level {
        1 => 4, // fastest
        3 => 2, // maximum effort
        _ => 0,
    };
    [0x1F, 0x8B, 8, 0, 0, 0, 0, 0, xfl, 255]
}

/// Deflate-style block compression engine with gzip framing.
///
/// Implements [`BlockEngine`]; see the crate docs for the step contract.
#[derive(Debug)]
pub struct DeflateEngine {
    format: ContainerFormat,
    level: u8,
    matcher: Matcher,
    /// Scratch-backed input accumulation segment.
    segment: Vec<u8>,
    segment_capacity: usize,
    /// Compressed bits awaiting delivery.
    sink: BitSink,
    /// Reusable token buffer.
    tokens: Vec<Token>,
    crc: Crc32,
    /// Total uncompressed bytes consumed (gzip ISIZE is this modulo 2^32).
    input_len: u64,
    header_written: bool,
    finished: bool,
    delivered: u64,
}

impl DeflateEngine {
    /// Create an engine with default parameters (gzip container, 32 KiB
    /// history, level 2). Call [`BlockEngine::reset`] before streaming.
    pub fn new() -> Self {
        Self {
            format: ContainerFormat::Gzip,
            level: 2,
            matcher: Matcher::new(2, MAX_WINDOW),
            segment: Vec::new(),
            segment_capacity: DEFAULT_SEGMENT_CAPACITY,
            sink: BitSink::new(),
            tokens: Vec::new(),
            crc: Crc32::new(),
            input_len: 0,
            header_written: false,
            finished: false,
            delivered: 0,
        }
    }

    /// Whether the final block and trailer have been emitted.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Uncompressed bytes consumed so far.
    pub fn total_consumed(&self) -> u64 {
        self.input_len
    }

    fn write_header(&mut self) {
        if !self.header_written {
            if self.format == ContainerFormat::Gzip {
                self.sink.write_bytes(&gzip_header(self.level));
            }
            self.header_written = true;
        }
    }

    /// Compress the pending segment into the sink as one block.
    ///
    /// A `final_block` request with an empty segment emits an empty stored
    /// block so the stream always ends with a BFINAL marker.
    fn emit_segment(&mut self, final_block: bool) {
        if self.segment.is_empty() {
            if final_block {
                write_stored(&mut self.sink, &[], true);
            }
            return;
        }

        self.tokens.clear();
        self.matcher.tokenize(&self.segment, &mut self.tokens);
        write_fixed(&mut self.sink, &self.tokens, final_block);
        self.segment.clear();
    }

    fn emit_sync_marker(&mut self) {
        self.emit_segment(false);
        // Empty stored block: byte-aligns the stream and gives decoders a
        // recoverable boundary.
        write_stored(&mut self.sink, &[], false);
        debug_assert!(self.sink.is_aligned());
    }

    fn emit_finish(&mut self) {
        self.emit_segment(true);
        self.sink.align_to_byte();
        if self.format == ContainerFormat::Gzip {
            let crc = self.crc.value();
            let isize = self.input_len as u32;
            self.sink.write_bytes(&crc.to_le_bytes());
            self.sink.write_bytes(&isize.to_le_bytes());
        }
        self.finished = true;
    }

    /// Move pending compressed bytes into the output region.
    fn deliver(&mut self, output: &mut [u8]) -> usize {
        let pending = self.sink.pending();
        let n = pending.len().min(output.len());
        output[..n].copy_from_slice(&pending[..n]);
        self.sink.consume(n);
        self.delivered += n as u64;
        n
    }
}

impl Default for DeflateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockEngine for DeflateEngine {
    fn reset(&mut self, format: ContainerFormat, history_bits: u8, level: u8) {
        self.format = format;
        self.level = level.clamp(1, 3);
        let window_limit = if history_bits >= 16 {
            MAX_WINDOW
        } else {
            (1usize << history_bits).min(MAX_WINDOW)
        };
        self.matcher.configure(self.level, window_limit);
        self.segment.clear();
        self.sink.clear();
        self.tokens.clear();
        self.crc.reset();
        self.input_len = 0;
        self.header_written = false;
        self.finished = false;
        self.delivered = 0;
    }

    fn attach_scratch(&mut self, scratch: Vec<u8>) {
        self.segment_capacity = scratch.capacity().max(MIN_SEGMENT_CAPACITY);
        self.segment = scratch;
        self.segment.clear();
    }

    fn step(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushMode,
        end_of_stream: bool,
    ) -> Result<StepOutcome> {
        debug_assert_eq!(
            end_of_stream,
            flush == FlushMode::Finish,
            "end_of_stream must accompany Finish and nothing else"
        );

        self.write_header();

        let mut consumed = 0;
        if !self.finished {
            while consumed < input.len() {
                let space = self.segment_capacity - self.segment.len();
                if space == 0 {
                    self.emit_segment(false);
                    continue;
                }
                let take = space.min(input.len() - consumed);
                self.segment
                    .extend_from_slice(&input[consumed..consumed + take]);
                self.crc.update(&input[consumed..consumed + take]);
                self.input_len += take as u64;
                consumed += take;
            }

            match flush {
                FlushMode::None => {}
                FlushMode::Sync => self.emit_sync_marker(),
                FlushMode::Finish => self.emit_finish(),
            }
        }

        let produced = self.deliver(output);
        Ok(StepOutcome { consumed, produced })
    }

    fn total_produced(&self) -> u64 {
        self.delivered
    }
}
