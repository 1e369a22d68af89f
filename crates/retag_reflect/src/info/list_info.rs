use retag_ptr::{Ptr, PtrMut};

use crate::info::{Type, TypeDescriptor, impl_type_fn};

/// Returns the number of items in a list.
pub type LenFn = unsafe fn(Ptr<'_>) -> usize;

/// Returns the item at an index, `None` when out of bounds.
pub type ItemFn = for<'a> unsafe fn(Ptr<'a>, usize) -> Option<Ptr<'a>>;

/// Returns the item at an index for writing, `None` when out of bounds.
pub type ItemMutFn = for<'a> unsafe fn(PtrMut<'a>, usize) -> Option<PtrMut<'a>>;

/// Metadata for growable sequences, such as `Vec<T>` and `VecDeque<T>`.
///
/// # Examples
///
/// ```
/// use retag_reflect::info::Described;
///
/// let info = <Vec<String>>::descriptor().as_list().unwrap();
/// assert!(info.item().type_is::<String>());
/// ```
#[derive(Debug, Clone)]
pub struct ListInfo {
    ty: Type,
    item: &'static TypeDescriptor,
    len: LenFn,
    get: ItemFn,
    get_mut: ItemMutFn,
}

impl ListInfo {
    impl_type_fn!(ty);

    /// Creates a new [`ListInfo`].
    ///
    /// # Safety
    ///
    /// The access functions must be sound for any valid `T`, and return
    /// pointers to values described by `item`.
    #[inline]
    pub unsafe fn new<T: 'static>(
        item: &'static TypeDescriptor,
        len: LenFn,
        get: ItemFn,
        get_mut: ItemMutFn,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            item,
            len,
            get,
            get_mut,
        }
    }

    pub(crate) fn with_item(&self, item: &'static TypeDescriptor) -> Self {
        Self {
            item,
            ..self.clone()
        }
    }

    /// Returns the item descriptor.
    #[inline]
    pub const fn item(&self) -> &'static TypeDescriptor {
        self.item
    }

    #[inline]
    pub(crate) const fn len_fn(&self) -> LenFn {
        self.len
    }

    #[inline]
    pub(crate) const fn get_fn(&self) -> ItemFn {
        self.get
    }

    #[inline]
    pub(crate) const fn get_mut_fn(&self) -> ItemMutFn {
        self.get_mut
    }
}
