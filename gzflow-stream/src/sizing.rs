//! Working-memory sizing policy.
//!
//! The engine trades scratch memory for compression ratio: a larger scratch
//! buffer lets it accumulate longer segments, giving the match finder more
//! history to work with. This module maps the caller-facing (intensity tier,
//! memory tier) pair to the scratch size handed to the engine at `init`.

use crate::session::CompressionTier;

/// Scratch sizes indexed by `(intensity - 1) * 5 + (memory_tier - 1)`.
///
/// Five memory tiers per intensity tier: minimal, small, medium, large,
/// extra-large. Sizes are non-decreasing within a tier and every tier's
/// footprint strictly exceeds the previous tier's.
const SCRATCH_SIZES: [usize; 15] = [
    16 * 1024,   // tier 1, minimal
    32 * 1024,   // tier 1, small
    64 * 1024,   // tier 1, medium
    128 * 1024,  // tier 1, large
    256 * 1024,  // tier 1, extra-large
    32 * 1024,   // tier 2, minimal
    64 * 1024,   // tier 2, small
    128 * 1024,  // tier 2, medium
    256 * 1024,  // tier 2, large
    512 * 1024,  // tier 2, extra-large
    64 * 1024,   // tier 3, minimal
    128 * 1024,  // tier 3, small
    256 * 1024,  // tier 3, medium
    512 * 1024,  // tier 3, large
    1024 * 1024, // tier 3, extra-large
];

/// Default scratch size per intensity tier (the medium entry), used by the
/// [`ScratchPolicy::LevelDefault`] policy.
const LEVEL_DEFAULT_SIZES: [usize; 3] = [64 * 1024, 128 * 1024, 256 * 1024];

/// Scratch size required for an (intensity tier, memory tier) combination.
///
/// `memory_tier` ranges over 1..=5. An out-of-range tier clamps to the
/// largest table entry rather than failing; callers that want strict bounds
/// should validate the tier themselves.
pub fn required_scratch_size(intensity: CompressionTier, memory_tier: u8) -> usize {
    let index = (intensity as usize - 1) * 5 + (memory_tier as usize).wrapping_sub(1);
    SCRATCH_SIZES
        .get(index)
        .copied()
        .unwrap_or(SCRATCH_SIZES[SCRATCH_SIZES.len() - 1])
}

/// How `init` sizes the engine's scratch buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScratchPolicy {
    /// Full table lookup over intensity and memory tiers.
    #[default]
    Tiered,
    /// Per-intensity default size; the memory tier is ignored.
    LevelDefault,
}

impl ScratchPolicy {
    /// Resolve the scratch size for this policy.
    pub fn scratch_size(self, intensity: CompressionTier, memory_tier: u8) -> usize {
        match self {
            Self::Tiered => required_scratch_size(intensity, memory_tier),
            Self::LevelDefault => LEVEL_DEFAULT_SIZES[intensity as usize - 1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIERS: [CompressionTier; 3] = [
        CompressionTier::Fast,
        CompressionTier::Balanced,
        CompressionTier::Best,
    ];

    #[test]
    fn test_monotonic_within_tier() {
        for tier in TIERS {
            for memory_tier in 1..5u8 {
                assert!(
                    required_scratch_size(tier, memory_tier + 1)
                        >= required_scratch_size(tier, memory_tier),
                    "{:?} tier {}",
                    tier,
                    memory_tier
                );
            }
        }
    }

    #[test]
    fn test_footprint_grows_across_tiers() {
        let footprint = |tier| -> usize { (1..=5).map(|m| required_scratch_size(tier, m)).sum() };
        assert!(footprint(CompressionTier::Fast) < footprint(CompressionTier::Balanced));
        assert!(footprint(CompressionTier::Balanced) < footprint(CompressionTier::Best));
    }

    #[test]
    fn test_out_of_range_clamps_to_largest() {
        let largest = required_scratch_size(CompressionTier::Best, 5);
        assert_eq!(required_scratch_size(CompressionTier::Best, 99), largest);
        assert_eq!(required_scratch_size(CompressionTier::Best, 6), largest);
        // Tier 0 underflows the index computation and lands in the clamp too.
        assert_eq!(required_scratch_size(CompressionTier::Fast, 0), largest);
    }

    #[test]
    fn test_level_default_ignores_memory_tier() {
        let policy = ScratchPolicy::LevelDefault;
        for tier in TIERS {
            let size = policy.scratch_size(tier, 1);
            for memory_tier in [0u8, 2, 5, 200] {
                assert_eq!(policy.scratch_size(tier, memory_tier), size);
            }
        }
    }

    #[test]
    fn test_tiered_matches_table_lookup() {
        let policy = ScratchPolicy::Tiered;
        assert_eq!(
            policy.scratch_size(CompressionTier::Fast, 3),
            required_scratch_size(CompressionTier::Fast, 3)
        );
    }
}
