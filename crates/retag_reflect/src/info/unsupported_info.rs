use crate::info::{Type, TypeKind, impl_type_fn};

/// Metadata for types that can be described but never retagged.
///
/// Channels, functions, raw pointers and `dyn` values have no field
/// structure to rebuild. Reaching one through a public field fails the
/// conversion with [`RetagError::UnsupportedFieldKind`].
///
/// [`RetagError::UnsupportedFieldKind`]: crate::retag::RetagError::UnsupportedFieldKind
#[derive(Debug, Clone)]
pub struct UnsupportedInfo {
    ty: Type,
    kind: TypeKind,
}

impl UnsupportedInfo {
    impl_type_fn!(ty);

    /// Creates a new [`UnsupportedInfo`] for a sized `T`.
    #[inline]
    pub fn new<T: 'static>(kind: TypeKind) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
        }
    }

    /// Creates a new [`UnsupportedInfo`] for an unsized `T`, such as `dyn Any`.
    #[inline]
    pub fn new_unsized<T: ?Sized + 'static>(kind: TypeKind) -> Self {
        Self {
            ty: Type::of_unsized::<T>(),
            kind,
        }
    }

    /// Returns the kind.
    #[inline]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }
}
