use crate::info::{Type, TypeDescriptor, impl_type_fn};

/// Metadata for fixed-size arrays `[T; N]`.
///
/// Items are stored inline, one item size apart.
///
/// # Examples
///
/// ```
/// use retag_reflect::info::Described;
///
/// let info = <[u16; 3]>::descriptor().as_array().unwrap();
/// assert_eq!(info.capacity(), 3);
/// assert!(info.item().type_is::<u16>());
/// ```
#[derive(Debug, Clone)]
pub struct ArrayInfo {
    ty: Type,
    item: &'static TypeDescriptor,
    capacity: usize,
}

impl ArrayInfo {
    impl_type_fn!(ty);

    /// Creates a new [`ArrayInfo`] for `[T; N]`, with the item descriptor of `T`.
    ///
    /// # Panics
    ///
    /// Panics if `item` does not describe `T`.
    #[inline]
    pub fn new<T: 'static, const N: usize>(item: &'static TypeDescriptor) -> Self {
        assert!(
            item.type_is::<T>(),
            "item descriptor of `{}` for `[{}; {N}]`",
            item.type_path(),
            core::any::type_name::<T>(),
        );
        Self {
            ty: Type::of::<[T; N]>(),
            item,
            capacity: N,
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

    /// Returns the number of items.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the distance in bytes between two items.
    #[inline]
    pub const fn stride(&self) -> usize {
        self.item.ty().size()
    }
}
