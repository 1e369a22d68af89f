use retag_ptr::Ptr;

use crate::info::{Type, impl_type_fn};

/// Views a value as `&dyn erased_serde::Serialize`.
///
/// # Safety
///
/// The pointer must point to a value of the type the hook was created for.
pub type SerializeFn = for<'a> unsafe fn(Ptr<'a>) -> &'a dyn erased_serde::Serialize;

/// Check if a value equals its type's default, used by `omitempty`.
///
/// # Safety
///
/// The pointer must point to a value of the type the hook was created for.
pub type IsDefaultFn = unsafe fn(Ptr<'_>) -> bool;

pub(crate) fn serialize_fn_of<T: erased_serde::Serialize + 'static>() -> SerializeFn {
    unsafe fn erase<'a, U: erased_serde::Serialize + 'static>(
        ptr: Ptr<'a>,
    ) -> &'a dyn erased_serde::Serialize {
        // SAFETY: the caller guarantees that `ptr` points to a `U`.
        unsafe { ptr.as_ref::<U>() }
    }
    erase::<T>
}

fn is_default_fn_of<T: Default + PartialEq + 'static>() -> IsDefaultFn {
    unsafe fn is_default<U: Default + PartialEq + 'static>(ptr: Ptr<'_>) -> bool {
        // SAFETY: the caller guarantees that `ptr` points to a `U`.
        *unsafe { ptr.as_ref::<U>() } == U::default()
    }
    is_default::<T>
}

/// Metadata for types whose internals are opaque to retagging.
///
/// "Opaque" means the value is used as a whole: primitives, strings, or user
/// types marked `#[retag(opaque)]`. Retagging returns opaque descriptors
/// unchanged.
///
/// # Examples
///
/// ```
/// use retag_reflect::info::{Described, TypeKind};
///
/// let info = String::descriptor();
/// assert_eq!(info.kind(), TypeKind::Opaque);
/// assert!(info.as_opaque().unwrap().serialize_fn().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct OpaqueInfo {
    ty: Type,
    serialize: Option<SerializeFn>,
    is_default: Option<IsDefaultFn>,
}

impl OpaqueInfo {
    impl_type_fn!(ty);

    /// Create a new [`OpaqueInfo`] without hooks.
    #[inline]
    pub fn new<T: 'static>() -> Self {
        Self {
            ty: Type::of::<T>(),
            serialize: None,
            is_default: None,
        }
    }

    /// Serialize values with `T`'s own [`Serialize`] impl.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not the described type.
    ///
    /// [`Serialize`]: serde_core::Serialize
    #[inline]
    pub fn with_serialize<T: erased_serde::Serialize + 'static>(self) -> Self {
        assert!(
            self.ty.is::<T>(),
            "serialize hook of `{}` for `{}`",
            core::any::type_name::<T>(),
            self.ty.path(),
        );
        Self {
            serialize: Some(serialize_fn_of::<T>()),
            ..self
        }
    }

    /// Treat values equal to `T::default()` as empty for `omitempty`.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not the described type.
    #[inline]
    pub fn with_is_default<T: Default + PartialEq + 'static>(self) -> Self {
        assert!(
            self.ty.is::<T>(),
            "default hook of `{}` for `{}`",
            core::any::type_name::<T>(),
            self.ty.path(),
        );
        Self {
            is_default: Some(is_default_fn_of::<T>()),
            ..self
        }
    }

    /// Returns the serialize hook, if any.
    #[inline]
    pub const fn serialize_fn(&self) -> Option<SerializeFn> {
        self.serialize
    }

    /// Returns the default-check hook, if any.
    #[inline]
    pub const fn is_default_fn(&self) -> Option<IsDefaultFn> {
        self.is_default
    }
}
