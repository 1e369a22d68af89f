use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::info::{FieldDescriptor, SerializeFn, Type, impl_type_fn, serialize_fn_of};

/// A container for named struct info.
///
/// Fields are kept in declaration order. A struct may carry a serialize
/// hook (`#[retag(serialize)]`), in which case serialization uses the type's
/// own `Serialize` impl instead of walking the fields.
///
/// # Examples
///
/// ```rust
/// use retag_reflect::derive::Described;
/// use retag_reflect::info::Described;
///
/// #[derive(Described)]
/// struct A {
///     val: f32,
/// }
///
/// let info = A::descriptor().as_struct().unwrap();
///
/// assert_eq!(info.field_len(), 1);
/// assert_eq!(info.index_of("val"), Some(0));
/// ```
#[derive(Clone, Debug)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[FieldDescriptor]>,
    serialize: Option<SerializeFn>,
}

impl StructInfo {
    impl_type_fn!(ty);

    /// Creates a new [`StructInfo`] for `T`.
    ///
    /// The order of fields is fixed by the input order.
    pub fn new<T: 'static>(fields: Vec<FieldDescriptor>) -> Self {
        Self {
            ty: Type::of::<T>(),
            fields: fields.into_boxed_slice(),
            serialize: None,
        }
    }

    /// Serialize values of this type with their own [`Serialize`] impl.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not the described type.
    ///
    /// [`Serialize`]: serde_core::Serialize
    #[inline]
    pub fn with_serialize<T: serde_core::Serialize + 'static>(self) -> Self {
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

    // Same identity and hooks, new fields and layout.
    pub(crate) fn derived(&self, fields: Box<[FieldDescriptor]>, ty: Type) -> Self {
        Self {
            ty,
            fields,
            serialize: self.serialize,
        }
    }

    /// Returns the serialize hook, if any.
    #[inline]
    pub const fn serialize_fn(&self) -> Option<SerializeFn> {
        self.serialize
    }

    /// Returns the first field named `name`.
    ///
    /// Private fields of derived descriptors are unnamed and never match.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        if name.is_empty() {
            return None;
        }
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Returns the field at `index`, if present.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    /// Returns an iterator over the fields in declaration order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    /// Returns the fields in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns the index of the field named `name`.
    ///
    /// This is O(N) complexity.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }
        self.fields.iter().position(|f| f.name() == name)
    }

    /// Returns the number of fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }
}
