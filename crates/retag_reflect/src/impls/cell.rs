//! Containers for static storage of type descriptors.
//!
//! ## NonGenericDescriptorCell
//!
//! For non generic types. Internally an [`OnceLock`], almost no additional expenses.
//!
//! ## GenericDescriptorCell
//!
//! If the type is generic, the `static CELL` inside `descriptor()` is shared by
//! every instantiation. Therefore, the inner of this container is a
//! [`TypeIdMap`] wrapped in [`RwLock`].

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use retag_utils::TypeIdMap;

use crate::info::TypeDescriptor;

/// Container for the static descriptor of a non-generic type.
///
/// ## Example
///
/// ```
/// use retag_reflect::impls::NonGenericDescriptorCell;
/// use retag_reflect::info::{Described, OpaqueInfo, TypeDescriptor};
///
/// struct Token;
///
/// // SAFETY: an opaque descriptor of `Token`.
/// unsafe impl Described for Token {
///     fn descriptor() -> &'static TypeDescriptor {
///         static CELL: NonGenericDescriptorCell = NonGenericDescriptorCell::new();
///         CELL.get_or_init(|| TypeDescriptor::Opaque(OpaqueInfo::new::<Token>()))
///     }
/// }
///
/// assert!(core::ptr::eq(Token::descriptor(), Token::descriptor()));
/// ```
pub struct NonGenericDescriptorCell(OnceLock<TypeDescriptor>);

impl NonGenericDescriptorCell {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored descriptor, building it with `f` on first access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeDescriptor) -> &TypeDescriptor {
        self.0.get_or_init(f)
    }
}

impl Default for NonGenericDescriptorCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Container for the static descriptors of a generic type.
///
/// ## Example
///
/// ```
/// use retag_reflect::impls::GenericDescriptorCell;
/// use retag_reflect::info::{Described, OpaqueInfo, TypeDescriptor};
///
/// struct Handle<T>(T);
///
/// // SAFETY: an opaque descriptor of `Handle<T>`.
/// unsafe impl<T: 'static> Described for Handle<T> {
///     fn descriptor() -> &'static TypeDescriptor {
///         static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
///         CELL.get_or_insert::<Self>(|| TypeDescriptor::Opaque(OpaqueInfo::new::<Self>()))
///     }
/// }
///
/// assert!(<Handle<u8>>::descriptor().type_is::<Handle<u8>>());
/// assert!(<Handle<u16>>::descriptor().type_is::<Handle<u16>>());
/// ```
pub struct GenericDescriptorCell(RwLock<TypeIdMap<&'static TypeDescriptor>>);

impl GenericDescriptorCell {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the descriptor stored for `G`, building it with `f` if absent.
    ///
    /// `f` runs without holding the lock, so it may resolve other
    /// descriptors from this same cell.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(
        &self,
        f: impl FnOnce() -> TypeDescriptor,
    ) -> &'static TypeDescriptor {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeDescriptor,
    ) -> &'static TypeDescriptor {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static TypeDescriptor> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    // A concurrent builder may have won; its descriptor is kept.
    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: TypeDescriptor) -> &'static TypeDescriptor {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}

impl Default for GenericDescriptorCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
