//! Runtime type descriptors.
//!
//! ## Menu
//!
//! - [`Type`]: a `TypeId`, a type path and a `Layout`.
//!
//! - [`TypeDescriptor`]: an enum of the per-kind infos below.
//!     - [`OpaqueInfo`]: values used as a whole (e.g. `u32`, `String`), with optional serialize and default hooks.
//!     - [`StructInfo`]: named fields with offsets, visibilities and tags.
//!     - [`PointerInfo`]: owning pointers (`Box<T>`, `Option<T>`), with a pointee descriptor.
//!     - [`ArrayInfo`]: inline arrays `[T; N]`.
//!     - [`ListInfo`]: growable sequences (`Vec<T>`, `VecDeque<T>`).
//!     - [`MapInfo`]: key-value maps (`HashMap<K, V>`, `BTreeMap<K, V>`).
//!     - [`UnsupportedInfo`]: channels, functions, raw pointers and `dyn` values.
//!
//! - [`FieldDescriptor`]: one struct field, its [`Visibility`] and [`Tag`].
//!
//! - [`TypeKind`]: the discriminator of a descriptor.
//!
//! - [`Described`]: a trait for obtaining the static `TypeDescriptor` of a type.

// -----------------------------------------------------------------------------
// Modules

mod array_info;
mod described;
mod descriptor;
mod field;
mod list_info;
mod map_info;
mod opaque_info;
mod pointer_info;
mod struct_info;
mod tag;
mod ty;
mod unsupported_info;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use opaque_info::serialize_fn_of;
pub(crate) use ty::impl_type_fn;

// -----------------------------------------------------------------------------
// Exports

pub use array_info::ArrayInfo;
pub use described::Described;
pub use descriptor::{KindError, TypeDescriptor, TypeKind};
pub use field::{FieldDescriptor, Visibility};
pub use list_info::{ItemFn, ItemMutFn, LenFn, ListInfo};
pub use map_info::{EntriesFn, MapInfo, MapIter};
pub use opaque_info::{IsDefaultFn, OpaqueInfo, SerializeFn};
pub use pointer_info::{DerefFn, DerefMutFn, PointerInfo};
pub use struct_info::StructInfo;
pub use tag::{Tag, TagIter};
pub use ty::Type;
pub use unsupported_info::UnsupportedInfo;
