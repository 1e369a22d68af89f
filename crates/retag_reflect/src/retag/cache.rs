use alloc::boxed::Box;
use std::sync::{PoisonError, RwLock};

use retag_utils::hash::hashbrown::hash_map::Entry;
use retag_utils::hash::{FixedHashState, HashMap};

use crate::info::TypeDescriptor;
use crate::retag::{RetagError, Rule, RuleId};

// -----------------------------------------------------------------------------
// Synthesized

/// Result of one synthesis step.
pub(crate) enum Synthesized {
    /// The original descriptor already fits the rule.
    Unchanged,
    /// A new descriptor, leaked once it wins the insert.
    New(TypeDescriptor),
}

// -----------------------------------------------------------------------------
// DescriptorCache

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    original: usize,
    rule: RuleId,
}

impl CacheKey {
    fn new(original: &'static TypeDescriptor, rule: &Rule) -> Self {
        Self {
            original: core::ptr::from_ref(original).addr(),
            rule: rule.id(),
        }
    }
}

struct CacheEntry {
    derived: &'static TypeDescriptor,
    // Keeps the rule allocation, and so its identity, alive.
    _rule: Rule,
}

/// Derived descriptors keyed by (original descriptor, rule).
///
/// Lookups share a read lock. A miss synthesizes outside of any lock and
/// then inserts under the write lock; if another thread inserted first, its
/// descriptor is returned and the fresh one is dropped. Entries are never
/// removed or overwritten.
pub(crate) struct DescriptorCache {
    map: RwLock<HashMap<CacheKey, CacheEntry>>,
}

pub(crate) static CACHE: DescriptorCache = DescriptorCache::new();

impl DescriptorCache {
    pub(crate) const fn new() -> Self {
        Self {
            map: RwLock::new(HashMap::with_hasher(FixedHashState)),
        }
    }

    fn get(&self, key: &CacheKey) -> Option<&'static TypeDescriptor> {
        self.map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .map(|entry| entry.derived)
    }

    /// Returns the cached descriptor for `(original, rule)`, or stores the
    /// one built by `synthesize`.
    ///
    /// An error from `synthesize` is returned as is, and nothing is stored.
    pub(crate) fn get_or_create(
        &self,
        original: &'static TypeDescriptor,
        rule: &Rule,
        synthesize: impl FnOnce() -> Result<Synthesized, RetagError>,
    ) -> Result<&'static TypeDescriptor, RetagError> {
        let key = CacheKey::new(original, rule);
        if let Some(derived) = self.get(&key) {
            log::trace!("cache hit for `{}` with {rule:?}", original.type_path());
            return Ok(derived);
        }

        let synthesized = synthesize()?;

        let mut map = self.map.write().unwrap_or_else(PoisonError::into_inner);
        match map.entry(key) {
            Entry::Occupied(entry) => {
                log::trace!(
                    "lost insert race for `{}` with {rule:?}",
                    original.type_path()
                );
                Ok(entry.get().derived)
            }
            Entry::Vacant(entry) => {
                let derived = match synthesized {
                    Synthesized::Unchanged => original,
                    Synthesized::New(descriptor) => Box::leak(Box::new(descriptor)),
                };
                entry.insert(CacheEntry {
                    derived,
                    _rule: rule.clone(),
                });
                Ok(derived)
            }
        }
    }

    /// Returns the number of cached pairs.
    pub(crate) fn len(&self) -> usize {
        self.map.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Returns the number of (type, rule) pairs in the process-wide cache.
///
/// Every struct, pointer, array, list and map reached while deriving counts,
/// including those that turned out unchanged. Opaque types are returned
/// as they are and never cached.
pub fn cache_len() -> usize {
    CACHE.len()
}
