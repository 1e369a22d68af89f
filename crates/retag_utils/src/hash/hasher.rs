//! Hash builders used by the descriptor cache and the descriptor cells.
//!
//! [`FixedHashState`] wraps `foldhash` with a fixed seed, so a key always
//! hashes to the same value. [`NoOpHashState`] passes an already well-mixed
//! `u64` (such as the bits of a `TypeId`) straight through.

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x2D35_8DCC_AA6C_78A5);

/// A [`foldhash::fast::FoldHasher`] created from a fixed seed.
pub type FixedHasher = FoldHasher<'static>;

/// Builds [`FixedHasher`]s that all share one fixed seed.
///
/// Address pairs (descriptor address, rule address) are the typical keys;
/// they are cheap to hash and need no DoS resistance.
///
/// # Examples
///
/// ```
/// use core::hash::{BuildHasher, Hash, Hasher};
/// use retag_utils::hash::FixedHashState;
///
/// let hash = |v: (usize, usize)| {
///     let mut hasher = FixedHashState.build_hasher();
///     v.hash(&mut hasher);
///     hasher.finish()
/// };
///
/// assert_eq!(hash((1, 2)), hash((1, 2)));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// NoOpHasher

/// A hasher that keeps the last written `u64` as the hash.
///
/// Byte writes are folded in with a rotate so that a single `write_u32(n)`
/// and a single `write_u64(n)` agree.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Builds [`NoOpHasher`]s, for keys that are already hashes.
///
/// # Examples
///
/// ```
/// use core::hash::{BuildHasher, Hash, Hasher};
/// use retag_utils::hash::NoOpHashState;
///
/// let mut hasher = NoOpHashState.build_hasher();
/// 3_u64.hash(&mut hasher);
///
/// assert_eq!(hasher.finish(), 3);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

#[cfg(test)]
mod tests {
    use core::hash::{BuildHasher, Hasher};

    use super::NoOpHashState;

    #[test]
    fn narrow_writes_match_u64() {
        let mut narrow = NoOpHashState.build_hasher();
        narrow.write_u32(1234);
        let mut wide = NoOpHashState.build_hasher();
        wide.write_u64(1234);
        assert_eq!(narrow.finish(), wide.finish());
    }
}
