//! # Dungeon Seed
//!
//! Every random choice in a run derives from one seed.
//!
//! ## Determinism Guarantee
//!
//! Given the same `DungeonSeed` and the same catalog, generation produces
//! **exactly** the same chamber graph on any platform.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Purpose tag for the chamber generator stream.
pub const GENERATOR_STREAM: u64 = 0x6E65_7261_7465;

/// Root seed for a dungeon run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DungeonSeed(u64);

impl DungeonSeed {
    /// Creates a new dungeon seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derives an independent sub-seed for a specific purpose.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        // FNV-1a style mixing
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }

    /// Builds the ChaCha stream for this seed.
    #[must_use]
    pub fn rng(self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.0)
    }
}

impl Default for DungeonSeed {
    fn default() -> Self {
        Self(0xDEAD_BEEF_CAFE_BABE)
    }
}
