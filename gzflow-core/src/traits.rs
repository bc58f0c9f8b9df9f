//! The block-engine capability consumed by the stream adapter.
//!
//! A block engine is an in-memory codec that works against a bounded input
//! region and a bounded output region per step, reporting how much of each it
//! consumed and produced. The stream adapter in `gzflow-stream` owns the
//! output chunk buffer and drives the engine fragment by fragment; the engine
//! owns everything behind the step boundary (history window, pending
//! compressed bits, container framing).

/// Flush mode for a single engine step.
///
/// Modes are mutually exclusive per step and are not persisted between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushMode {
    /// Keep buffering; emit output only when internal thresholds require it.
    #[default]
    None,
    /// Emit a decodable synchronization point; the stream continues.
    Sync,
    /// Terminate the stream: emit the final block and container trailer.
    Finish,
}

/// Container format the engine frames its output in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerFormat {
    /// gzip container (RFC 1952): header, deflate body, CRC-32 + size trailer.
    #[default]
    Gzip,
    /// Bare deflate bit stream (RFC 1951), no framing.
    Raw,
}

/// What a single engine step consumed and produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Bytes consumed from the input region.
    pub consumed: usize,
    /// Bytes written to the output region.
    pub produced: usize,
}

/// A block-oriented compression engine.
///
/// # Step contract
///
/// [`step`](BlockEngine::step) writes as much compressed output as fits in
/// `output` before returning. An implementation may only leave input
/// unconsumed when the output region has been completely filled; a caller
/// seeing unconsumed input together with remaining output space may treat
/// that as a fatal internal-invariant violation.
pub trait BlockEngine {
    /// Reset the engine to the start of a fresh stream.
    ///
    /// `history_bits` caps back-reference distance at `1 << history_bits`
    /// (implementations clamp to their own maximum); `level` selects the
    /// effort tier, 1..=3 by increasing cost.
    fn reset(&mut self, format: ContainerFormat, history_bits: u8, level: u8);

    /// Hand the engine its working memory.
    ///
    /// The buffer's capacity is the engine's to interpret; it is owned by the
    /// engine until the engine is dropped or reset with a new buffer.
    fn attach_scratch(&mut self, scratch: Vec<u8>);

    /// Run one compression step.
    ///
    /// Consumes bytes from `input`, writes compressed bytes into `output`,
    /// and reports both counts. `end_of_stream` must be true exactly when
    /// `flush` is [`FlushMode::Finish`].
    fn step(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushMode,
        end_of_stream: bool,
    ) -> crate::error::Result<StepOutcome>;

    /// Compressed bytes delivered into output regions over the engine's
    /// lifetime.
    fn total_produced(&self) -> u64;
}
