use core::alloc::Layout;
use core::any::{Any, TypeId};
use core::fmt;

/// The identity and memory shape of a described type.
///
/// Every [`TypeDescriptor`](crate::info::TypeDescriptor) carries one. A
/// derived descriptor keeps the [`TypeId`] and path of the type it was derived
/// from, so a value read through a derived view is still the same Rust type.
///
/// # Examples
///
/// ```
/// use retag_reflect::info::Type;
///
/// let ty = Type::of::<u64>();
/// assert!(ty.is::<u64>());
/// assert_eq!(ty.path(), "u64");
/// assert_eq!(ty.size(), 8);
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Type {
    id: TypeId,
    path: &'static str,
    layout: Layout,
}

impl Type {
    /// Returns the `Type` of a sized `T`.
    #[inline]
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: core::any::type_name::<T>(),
            layout: Layout::new::<T>(),
        }
    }

    /// Returns the `Type` of an unsized `T`, such as `dyn Any`.
    ///
    /// Unsized types have no static layout, an empty one is recorded.
    #[inline]
    pub fn of_unsized<T: ?Sized + Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: core::any::type_name::<T>(),
            layout: Layout::new::<()>(),
        }
    }

    /// Returns a copy with another layout.
    #[inline]
    pub(crate) const fn with_layout(self, layout: Layout) -> Self {
        Self { layout, ..self }
    }

    /// Returns the [`TypeId`].
    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type path, as given by [`core::any::type_name`].
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the memory layout.
    #[inline]
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// Returns the size in bytes.
    #[inline]
    pub const fn size(&self) -> usize {
        self.layout.size()
    }

    /// Returns the alignment in bytes.
    #[inline]
    pub const fn align(&self) -> usize {
        self.layout.align()
    }

    /// Check if this is the type `T`.
    #[inline]
    pub fn is<T: ?Sized + Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Type")
            .field("path", &self.path)
            .field("size", &self.layout.size())
            .field("align", &self.layout.align())
            .finish()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.path)
    }
}

/// Implements `ty` and a few shortcuts for an info struct with a `ty: Type` field.
macro_rules! impl_type_fn {
    ($field:ident) => {
        /// Returns the underlying [`Type`](crate::info::Type).
        #[inline]
        pub const fn ty(&self) -> &$crate::info::Type {
            &self.$field
        }

        /// Returns the full type path.
        #[inline]
        pub const fn type_path(&self) -> &'static str {
            self.$field.path()
        }

        /// Returns the [`TypeId`](core::any::TypeId).
        #[inline]
        pub const fn type_id(&self) -> ::core::any::TypeId {
            self.$field.id()
        }

        /// Check if the described type is `T`.
        #[inline]
        pub fn type_is<T: ?Sized + ::core::any::Any>(&self) -> bool {
            self.$field.is::<T>()
        }
    };
}

pub(crate) use impl_type_fn;
