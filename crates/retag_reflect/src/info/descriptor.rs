use core::{error, fmt};

use crate::info::{ArrayInfo, ListInfo, MapInfo, OpaqueInfo};
use crate::info::{PointerInfo, StructInfo, Type, UnsupportedInfo};

// -----------------------------------------------------------------------------
// TypeKind

/// An enumeration of the "kinds" of a described type.
///
/// The first six kinds can be retagged. The remaining four are reported by
/// [`UnsupportedInfo`] and make a conversion fail when a public field
/// reaches them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Opaque,
    Struct,
    Pointer,
    Array,
    List,
    Map,
    Channel,
    Function,
    RawPointer,
    Dynamic,
}

impl TypeKind {
    /// Returns `true` for kinds that retagging can handle.
    #[inline]
    pub const fn is_supported(self) -> bool {
        !matches!(
            self,
            Self::Channel | Self::Function | Self::RawPointer | Self::Dynamic
        )
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opaque => f.pad("Opaque"),
            Self::Struct => f.pad("Struct"),
            Self::Pointer => f.pad("Pointer"),
            Self::Array => f.pad("Array"),
            Self::List => f.pad("List"),
            Self::Map => f.pad("Map"),
            Self::Channel => f.pad("Channel"),
            Self::Function => f.pad("Function"),
            Self::RawPointer => f.pad("RawPointer"),
            Self::Dynamic => f.pad("Dynamic"),
        }
    }
}

/// Error returned when a `TypeDescriptor` is not the expected `TypeKind`.
#[derive(Debug)]
pub struct KindError {
    pub expected: TypeKind,
    pub received: TypeKind,
}

impl fmt::Display for KindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type kind mismatch: expected {}, received {}",
            self.expected, self.received
        )
    }
}

impl error::Error for KindError {}

// -----------------------------------------------------------------------------
// TypeDescriptor

/// Runtime description of a type: its identity, layout and structure.
///
/// A descriptor is either an *original*, built once per type by
/// [`Described::descriptor`](crate::info::Described::descriptor), or a
/// *derived* one, built by retagging an original with a
/// [`Rule`](crate::retag::Rule). Both are `&'static` and never freed.
///
/// A derived descriptor has the same [`TypeId`](core::any::TypeId), size,
/// alignment and field offsets as its original. Only the field tags differ,
/// and private fields lose their names.
///
/// # Examples
///
/// ```
/// use retag_reflect::info::{Described, TypeKind};
///
/// let info = u32::descriptor();
/// assert_eq!(info.kind(), TypeKind::Opaque);
/// assert!(info.as_struct().is_err());
/// ```
#[derive(Debug, Clone)]
pub enum TypeDescriptor {
    Opaque(OpaqueInfo),
    Struct(StructInfo),
    Pointer(PointerInfo),
    Array(ArrayInfo),
    List(ListInfo),
    Map(MapInfo),
    Unsupported(UnsupportedInfo),
}

// Helper macro that implements type-safe accessor methods like `as_struct`.
macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        /// Convert [`TypeDescriptor`] to the specific info.
        pub const fn $name(&self) -> Result<&$info, KindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(KindError {
                    expected: TypeKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeDescriptor {
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);
    impl_cast_method!(as_struct: Struct => StructInfo);
    impl_cast_method!(as_pointer: Pointer => PointerInfo);
    impl_cast_method!(as_array: Array => ArrayInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_map: Map => MapInfo);

    /// Returns the underlying [`Type`].
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Opaque(info) => info.ty(),
            Self::Struct(info) => info.ty(),
            Self::Pointer(info) => info.ty(),
            Self::Array(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Unsupported(info) => info.ty(),
        }
    }

    /// Returns the full type path.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    /// Returns the [`TypeId`](core::any::TypeId).
    #[inline]
    pub const fn type_id(&self) -> core::any::TypeId {
        self.ty().id()
    }

    /// Check if the described type is `T`.
    #[inline]
    pub fn type_is<T: ?Sized + core::any::Any>(&self) -> bool {
        self.ty().is::<T>()
    }

    /// Returns the [`TypeKind`].
    pub const fn kind(&self) -> TypeKind {
        match self {
            Self::Opaque(_) => TypeKind::Opaque,
            Self::Struct(_) => TypeKind::Struct,
            Self::Pointer(_) => TypeKind::Pointer,
            Self::Array(_) => TypeKind::Array,
            Self::List(_) => TypeKind::List,
            Self::Map(_) => TypeKind::Map,
            Self::Unsupported(info) => info.kind(),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind(), self.type_path())
    }
}
