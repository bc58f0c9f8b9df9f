//! The compression session: chunk-buffer lifecycle and flush-state machine.

use crate::buffer::{FragmentSource, OutputSink};
use crate::sizing::ScratchPolicy;
use gzflow_core::error::{GzFlowError, Result};
use gzflow_core::{BlockEngine, ContainerFormat, FlushMode};

/// History window bits the engine accepts (window = `1 << bits` bytes).
const WINDOW_BITS_RANGE: std::ops::RangeInclusive<u8> = 9..=15;

/// Compression intensity tier.
///
/// Three tiers by increasing effort; higher tiers spend more CPU per byte
/// and typically compress better.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CompressionTier {
    /// Cheapest per-byte cost.
    Fast = 1,
    /// Balanced cost and ratio.
    Balanced = 2,
    /// Best ratio this engine offers.
    Best = 3,
}

impl CompressionTier {
    /// The engine-internal level value for this tier.
    pub fn engine_level(self) -> u8 {
        self as u8
    }
}

/// Per-call flush request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushRequest {
    /// More fragments are expected later; emit a sync point and keep the
    /// stream open.
    Continue,
    /// This is the last fragment sequence; terminate the stream.
    Finish,
}

/// A streaming compression session over a block engine.
///
/// One session per logical compressed stream: create, [`init`] once, feed
/// zero or more [`compress`] calls, drop. There is no reset-and-reuse path;
/// the engine handle, chunk buffer, and scratch buffer live exactly as long
/// as the session.
///
/// Sessions are single-threaded and synchronous; the `&mut` API leaves any
/// cross-thread serialization to the caller.
///
/// Calling [`init`] twice or [`compress`] before [`init`] is a programming
/// error and panics in every build mode.
///
/// [`init`]: CompressionSession::init
/// [`compress`]: CompressionSession::compress
#[derive(Debug)]
pub struct CompressionSession<E: BlockEngine> {
    engine: E,
    /// Output chunk buffer; `filled` is the engine's write cursor into it.
    chunk: Vec<u8>,
    filled: usize,
    initialized: bool,
    level: Option<CompressionTier>,
    policy: ScratchPolicy,
    /// Total bytes handed to output sinks.
    drained: u64,
}

impl<E: BlockEngine> CompressionSession<E> {
    /// Default output chunk size in bytes.
    pub const DEFAULT_CHUNK_SIZE: usize = 4096;

    /// Create a session with the default chunk size.
    pub fn new(engine: E) -> Self {
        Self::with_chunk_size(engine, Self::DEFAULT_CHUNK_SIZE)
    }

    /// Create a session delivering output in chunks of `chunk_size` bytes.
    pub fn with_chunk_size(engine: E, chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk size must be non-zero");
        Self {
            engine,
            chunk: vec![0; chunk_size],
            filled: 0,
            initialized: false,
            level: None,
            policy: ScratchPolicy::default(),
            drained: 0,
        }
    }

    /// Select the scratch sizing policy. Only meaningful before [`init`].
    ///
    /// [`init`]: CompressionSession::init
    pub fn with_scratch_policy(mut self, policy: ScratchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Configure the engine and allocate its working memory.
    ///
    /// `window_bits` sets the history window (`1 << window_bits` bytes) and
    /// must lie in 9..=15; `memory_tier` (1..=5) selects the scratch size
    /// class within the intensity tier, resolved through the session's
    /// [`ScratchPolicy`].
    pub fn init(
        &mut self,
        level: CompressionTier,
        window_bits: u8,
        memory_tier: u8,
    ) -> Result<()> {
        assert!(
            !self.initialized,
            "init called twice on a compression session"
        );
        if !WINDOW_BITS_RANGE.contains(&window_bits) {
            return Err(GzFlowError::invalid_config(format!(
                "window bits {} outside {}..={}",
                window_bits,
                WINDOW_BITS_RANGE.start(),
                WINDOW_BITS_RANGE.end()
            )));
        }

        self.engine
            .reset(ContainerFormat::Gzip, window_bits, level.engine_level());

        let scratch_size = self.policy.scratch_size(level, memory_tier);
        self.engine.attach_scratch(Vec::with_capacity(scratch_size));

        self.level = Some(level);
        self.initialized = true;
        Ok(())
    }

    /// Whether [`init`](CompressionSession::init) has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The intensity tier chosen at init, if any.
    pub fn level(&self) -> Option<CompressionTier> {
        self.level
    }

    /// The configured chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk.len()
    }

    /// Total bytes appended to output sinks over the session's lifetime.
    pub fn bytes_emitted(&self) -> u64 {
        self.drained
    }

    /// Compress all pending input fragments, then flush.
    ///
    /// Fragments are fed to the engine in order and removed from `input` only
    /// once fully consumed. On return every fragment has been consumed and
    /// the requested flush boundary has been emitted: a decodable sync point
    /// for [`FlushRequest::Continue`], the stream terminator for
    /// [`FlushRequest::Finish`]. Calling with an empty `input` and `Finish`
    /// is valid and still emits a complete, decodable stream.
    pub fn compress<I, O>(&mut self, input: &mut I, output: &mut O, flush: FlushRequest) -> Result<()>
    where
        I: FragmentSource + ?Sized,
        O: OutputSink + ?Sized,
    {
        assert!(self.initialized, "compress called before init");

        loop {
            let len = match input.front() {
                Some(fragment) => {
                    self.process(fragment, FlushMode::None, output)?;
                    fragment.len()
                }
                None => break,
            };
            input.consume(len);
        }

        let mode = match flush {
            FlushRequest::Continue => FlushMode::Sync,
            FlushRequest::Finish => FlushMode::Finish,
        };
        self.process(&[], mode, output)?;

        // Residual bytes below a full chunk still belong to this flush.
        self.drain_chunk(output);
        Ok(())
    }

    /// Run engine steps until `input` is consumed and the chunk is no longer
    /// being filled to capacity, draining each completed chunk.
    fn process<O>(&mut self, mut input: &[u8], flush: FlushMode, output: &mut O) -> Result<()>
    where
        O: OutputSink + ?Sized,
    {
        let end_of_stream = flush == FlushMode::Finish;
        loop {
            let outcome =
                self.engine
                    .step(input, &mut self.chunk[self.filled..], flush, end_of_stream)?;
            input = &input[outcome.consumed..];
            self.filled += outcome.produced;

            if self.filled == self.chunk.len() {
                self.drain_chunk(output);
                continue;
            }
            break;
        }

        // The engine only leaves input unconsumed when the output window is
        // exhausted, and the loop above always re-offers a fresh window.
        assert!(
            input.is_empty(),
            "engine left input unconsumed with output space available"
        );
        Ok(())
    }

    /// Move the filled portion of the chunk buffer to the output sink and
    /// reset the write cursor. Safe to call with nothing buffered.
    fn drain_chunk<O>(&mut self, output: &mut O)
    where
        O: OutputSink + ?Sized,
    {
        if self.filled > 0 {
            output.append(&self.chunk[..self.filled]);
            self.drained += self.filled as u64;
            self.filled = 0;
        }
    }
}
