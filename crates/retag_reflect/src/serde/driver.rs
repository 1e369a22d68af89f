use alloc::format;

use serde_core::{Serialize, Serializer};

use super::error_utils::{TypeScope, make_custom_error};
use super::map_serializer::MapSerializer;
use super::seq_serializer::SeqSerializer;
use super::struct_serializer::StructSerializer;

use crate::derived::DerivedRef;
use crate::info::TypeDescriptor;

// -----------------------------------------------------------------------------
// SerializeDriver

/// Serializes a [`DerivedRef`] according to the tags of its descriptor.
///
/// # Serialization Rules
///
/// - **Struct**: a map of public fields. Each field's tag value under `key`
///   decides how it appears:
///     - `-` skips the field (`-,` names it `-`);
///     - `name` renames it, an empty name keeps the field name;
///     - `,omitempty` skips it when empty: a null pointer, an empty array,
///       list or map, or an opaque value equal to its default.
///
///   Structs marked `#[retag(serialize)]` use their own `Serialize` impl.
/// - **Pointer**: the pointee, or `none` for a null `Option`.
/// - **Array** and **List**: a sequence.
/// - **Map**: a map.
/// - **Opaque**: the type's own `Serialize` impl. Opaque types without one
///   fail with a custom error.
///
/// # Examples
///
/// ```
/// use retag_reflect::derive::Described;
/// use retag_reflect::retag::{Rule, convert};
///
/// #[derive(Described)]
/// pub struct Page {
///     #[retag(json = "title")]
///     pub heading: String,
///     #[retag(json = "tags,omitempty")]
///     pub labels: Vec<String>,
///     #[retag(json = "-")]
///     pub draft: bool,
/// }
///
/// let keep = Rule::new(|owner: &retag_reflect::info::StructInfo, index: usize| {
///     owner.field_at(index).unwrap().tag().clone()
/// });
///
/// let page = Page { heading: "Home".into(), labels: vec![], draft: true };
/// let view = convert(&page, &keep);
///
/// let output = serde_json::to_string(&view.serialize_with("json")).unwrap();
/// assert_eq!(output, r#"{"title":"Home"}"#);
///
/// // Without tags under the key, fields keep their names.
/// let output = serde_json::to_string(&view.serialize_with("yaml")).unwrap();
/// assert_eq!(output, r#"{"heading":"Home","labels":[],"draft":true}"#);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct SerializeDriver<'a, 'k> {
    value: DerivedRef<'a>,
    key: &'k str,
}

impl<'a, 'k> SerializeDriver<'a, 'k> {
    /// Creates a driver that reads tag values under `key`.
    #[inline]
    pub const fn new(value: DerivedRef<'a>, key: &'k str) -> Self {
        Self { value, key }
    }

    /// Returns the serialized value.
    #[inline]
    pub const fn value(&self) -> DerivedRef<'a> {
        self.value
    }

    /// Returns the tag key.
    #[inline]
    pub const fn key(&self) -> &'k str {
        self.key
    }

    #[inline]
    pub(super) const fn with_value(&self, value: DerivedRef<'a>) -> Self {
        Self {
            value,
            key: self.key,
        }
    }
}

impl Serialize for SerializeDriver<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let descriptor = self.value.descriptor();
        let _scope = TypeScope::enter(descriptor);

        let ptr = self.value.as_ptr();
        match descriptor {
            TypeDescriptor::Opaque(info) => match info.serialize_fn() {
                // SAFETY: the hook belongs to the described type.
                Some(erase) => unsafe { erase(ptr) }.serialize(serializer),
                None => Err(make_custom_error(format!(
                    "opaque type `{}` has no serialize hook",
                    info.type_path()
                ))),
            },
            TypeDescriptor::Struct(info) => match info.serialize_fn() {
                // SAFETY: the hook belongs to the described type.
                Some(erase) => unsafe { erase(ptr) }.serialize(serializer),
                None => StructSerializer { driver: self }.serialize(serializer),
            },
            TypeDescriptor::Pointer(info) => match self.value.pointee() {
                Some(pointee) if info.is_nullable() => {
                    serializer.serialize_some(&self.with_value(pointee))
                }
                Some(pointee) => self.with_value(pointee).serialize(serializer),
                None => serializer.serialize_none(),
            },
            TypeDescriptor::Array(_) | TypeDescriptor::List(_) => {
                SeqSerializer { driver: self }.serialize(serializer)
            }
            TypeDescriptor::Map(_) => MapSerializer { driver: self }.serialize(serializer),
            TypeDescriptor::Unsupported(info) => Err(make_custom_error(format!(
                "cannot serialize {} type `{}`",
                info.kind(),
                info.type_path()
            ))),
        }
    }
}
