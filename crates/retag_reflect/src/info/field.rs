use core::any::{Any, TypeId};

use crate::info::{Described, Tag, TypeDescriptor};

// -----------------------------------------------------------------------------
// Visibility

/// Whether a field can be named from outside its type's module.
///
/// Only plain `pub` fields are [`Public`](Visibility::Public); `pub(crate)`,
/// `pub(super)`, `pub(in ..)` and private fields are all
/// [`Private`](Visibility::Private).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    /// Returns `true` for [`Visibility::Public`].
    #[inline]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

// -----------------------------------------------------------------------------
// FieldDescriptor

/// Information for a named struct field.
///
/// A field of an original descriptor keeps its declared name. In a derived
/// descriptor, private fields have an empty name: they still occupy their
/// bytes but take no part in name lookup or serialization.
///
/// # Examples
///
/// ```
/// use retag_reflect::derive::Described;
/// use retag_reflect::info::{Described, Visibility};
///
/// #[derive(Described)]
/// pub struct Foo {
///     #[retag(json = "id")]
///     pub id: u32,
///     secret: u64,
/// }
///
/// let info = Foo::descriptor().as_struct().unwrap();
/// let id = info.field_at(0).unwrap();
///
/// assert_eq!(id.name(), "id");
/// assert!(id.type_is::<u32>());
/// assert_eq!(id.tag().get("json"), "id");
/// assert_eq!(info.field("secret").unwrap().visibility(), Visibility::Private);
/// ```
#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    name: &'static str,
    visibility: Visibility,
    offset: usize,
    descriptor: &'static TypeDescriptor,
    tag: Tag,
}

impl FieldDescriptor {
    /// Creates a field of type `T` located `offset` bytes into its struct.
    ///
    /// The field's descriptor is resolved immediately, so self-referential
    /// types cannot be described.
    ///
    /// # Safety
    ///
    /// The field must be part of a [`StructInfo`](crate::info::StructInfo)
    /// for a type that has a field of type `T` at byte offset `offset`.
    /// Derived views read memory through this offset without further checks.
    #[inline]
    pub unsafe fn new<T: Described>(
        name: &'static str,
        visibility: Visibility,
        offset: usize,
    ) -> Self {
        Self {
            name,
            visibility,
            offset,
            descriptor: T::descriptor(),
            tag: Tag::EMPTY,
        }
    }

    /// Returns this field with `tag` attached.
    #[inline]
    pub fn with_tag(self, tag: Tag) -> Self {
        Self { tag, ..self }
    }

    // Keeps the offset; `descriptor` must share the `TypeId` and layout of the old one.
    pub(crate) fn retyped(&self, descriptor: &'static TypeDescriptor, tag: Tag) -> Self {
        Self {
            name: self.name,
            visibility: self.visibility,
            offset: self.offset,
            descriptor,
            tag,
        }
    }

    pub(crate) fn anonymized(&self, tag: Tag) -> Self {
        Self {
            name: "",
            visibility: self.visibility,
            offset: self.offset,
            descriptor: self.descriptor,
            tag,
        }
    }

    /// Returns the field name, empty for a private field of a derived type.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the field's [`Visibility`].
    #[inline]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns `true` if the field is `pub`.
    #[inline]
    pub const fn is_public(&self) -> bool {
        self.visibility.is_public()
    }

    /// Returns the byte offset inside the enclosing struct.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the descriptor of the field's type.
    #[inline]
    pub const fn descriptor(&self) -> &'static TypeDescriptor {
        self.descriptor
    }

    /// Returns the field's tag.
    #[inline]
    pub const fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Returns the `TypeId` of the field's type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.descriptor.type_id()
    }

    /// Check if the field's type is `T`.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.type_id() == TypeId::of::<T>()
    }
}
