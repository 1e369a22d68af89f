use alloc::boxed::Box;

use retag_ptr::Ptr;

use crate::info::{LenFn, Type, TypeDescriptor, impl_type_fn};

/// A boxed iterator over `(key, value)` pointers of a map.
pub type MapIter<'a> = Box<dyn Iterator<Item = (Ptr<'a>, Ptr<'a>)> + 'a>;

/// Returns an iterator over the entries of a map.
pub type EntriesFn = for<'a> unsafe fn(Ptr<'a>) -> MapIter<'a>;

/// Metadata for key-value maps, such as `HashMap<K, V>` and `BTreeMap<K, V>`.
///
/// Entries are read-only through derived views; keys cannot be moved and
/// values would need a lookup by key.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use retag_reflect::info::Described;
///
/// let info = <BTreeMap<String, u32>>::descriptor().as_map().unwrap();
/// assert!(info.key().type_is::<String>());
/// assert!(info.value().type_is::<u32>());
/// ```
#[derive(Debug, Clone)]
pub struct MapInfo {
    ty: Type,
    key: &'static TypeDescriptor,
    value: &'static TypeDescriptor,
    len: LenFn,
    entries: EntriesFn,
}

impl MapInfo {
    impl_type_fn!(ty);

    /// Creates a new [`MapInfo`].
    ///
    /// # Safety
    ///
    /// The access functions must be sound for any valid `T`, and yield
    /// pointers to values described by `key` and `value`.
    #[inline]
    pub unsafe fn new<T: 'static>(
        key: &'static TypeDescriptor,
        value: &'static TypeDescriptor,
        len: LenFn,
        entries: EntriesFn,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            key,
            value,
            len,
            entries,
        }
    }

    pub(crate) fn with_entry(
        &self,
        key: &'static TypeDescriptor,
        value: &'static TypeDescriptor,
    ) -> Self {
        Self {
            key,
            value,
            ..self.clone()
        }
    }

    /// Returns the key descriptor.
    #[inline]
    pub const fn key(&self) -> &'static TypeDescriptor {
        self.key
    }

    /// Returns the value descriptor.
    #[inline]
    pub const fn value(&self) -> &'static TypeDescriptor {
        self.value
    }

    #[inline]
    pub(crate) const fn len_fn(&self) -> LenFn {
        self.len
    }

    #[inline]
    pub(crate) const fn entries_fn(&self) -> EntriesFn {
        self.entries
    }
}
