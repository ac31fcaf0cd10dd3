//! Deterministic hashing for the hull's working sets.
//!
//! Hull construction never iterates a hash container, but a fixed state keeps
//! lookups reproducible across runs and platforms.

use core::hash::BuildHasher;
use foldhash::fast::{FixedState, FoldHasher};

/// Seed for [`FixedHasher`]. Any constant works; this one is arbitrary.
const FIXED_STATE: FixedState =
    FixedState::with_seed(0b1001010111101110000001001100010000000011001001101011001001111000);

/// A [`BuildHasher`] with a fixed seed.
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHasher;

impl BuildHasher for FixedHasher {
    type Hasher = FoldHasher<'static>;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_STATE.build_hasher()
    }
}

/// A hash set using [`FixedHasher`].
pub type FixedHashSet<T> = hashbrown::HashSet<T, FixedHasher>;

/// A hash map using [`FixedHasher`].
pub type FixedHashMap<K, V> = hashbrown::HashMap<K, V, FixedHasher>;
