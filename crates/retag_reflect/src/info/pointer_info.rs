use retag_ptr::{Ptr, PtrMut};

use crate::info::{Type, TypeDescriptor, impl_type_fn};

/// Resolves a pointer value to its pointee, `None` when null.
pub type DerefFn = for<'a> unsafe fn(Ptr<'a>) -> Option<Ptr<'a>>;

/// Resolves a pointer value to its pointee for writing, `None` when null.
pub type DerefMutFn = for<'a> unsafe fn(PtrMut<'a>) -> Option<PtrMut<'a>>;

/// Metadata for owning pointer-like types, such as `Box<T>` and `Option<T>`.
///
/// A nullable pointer (`Option<T>`) may have no pointee. Deriving a pointer
/// descriptor derives its pointee and keeps the access functions, since the
/// pointer's own bytes are untouched.
///
/// # Examples
///
/// ```
/// use retag_reflect::info::{Described, TypeKind};
///
/// let info = <Option<Box<u8>>>::descriptor().as_pointer().unwrap();
/// assert!(info.is_nullable());
/// assert_eq!(info.pointee().kind(), TypeKind::Pointer);
/// ```
#[derive(Debug, Clone)]
pub struct PointerInfo {
    ty: Type,
    pointee: &'static TypeDescriptor,
    nullable: bool,
    deref: DerefFn,
    deref_mut: DerefMutFn,
}

impl PointerInfo {
    impl_type_fn!(ty);

    /// Creates a new [`PointerInfo`].
    ///
    /// # Safety
    ///
    /// `deref` and `deref_mut` must be sound for any valid `T`, and return
    /// pointers to values described by `pointee`.
    #[inline]
    pub unsafe fn new<T: 'static>(
        pointee: &'static TypeDescriptor,
        nullable: bool,
        deref: DerefFn,
        deref_mut: DerefMutFn,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            pointee,
            nullable,
            deref,
            deref_mut,
        }
    }

    pub(crate) fn with_pointee(&self, pointee: &'static TypeDescriptor) -> Self {
        Self {
            pointee,
            ..self.clone()
        }
    }

    /// Returns the pointee's descriptor.
    #[inline]
    pub const fn pointee(&self) -> &'static TypeDescriptor {
        self.pointee
    }

    /// Returns `true` if a value may have no pointee.
    #[inline]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[inline]
    pub(crate) const fn deref_fn(&self) -> DerefFn {
        self.deref
    }

    #[inline]
    pub(crate) const fn deref_mut_fn(&self) -> DerefMutFn {
        self.deref_mut
    }
}
