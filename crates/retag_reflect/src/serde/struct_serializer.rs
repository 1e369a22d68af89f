use alloc::borrow::Cow;
use alloc::string::ToString;

use retag_utils::vec::FastVec;
use serde_core::ser::{Serialize, SerializeMap, Serializer};

use super::SerializeDriver;

use crate::derived::DerivedRef;
use crate::info::{FieldDescriptor, TypeDescriptor};

/// How a field appears in the output, parsed from its tag value.
#[derive(Debug, PartialEq, Eq)]
pub(super) struct FieldOptions<'t> {
    pub name: Cow<'t, str>,
    pub omit_empty: bool,
}

impl<'t> FieldOptions<'t> {
    /// Returns `None` when the field is skipped.
    pub fn parse(field: &'t FieldDescriptor, key: &str) -> Option<Self> {
        let value = field.tag().get(key);
        if value == "-" {
            return None;
        }

        let (name, omit_empty) = match value.split_once(',') {
            Some((name, options)) => (
                name.to_string(),
                options.split(',').any(|opt| opt == "omitempty"),
            ),
            None => (value.into_owned(), false),
        };

        let name = if name.is_empty() {
            Cow::Borrowed(field.name())
        } else {
            Cow::Owned(name)
        };

        Some(Self { name, omit_empty })
    }
}

/// Check if `value` counts as empty for `omitempty`.
pub(super) fn is_empty_value(value: DerivedRef<'_>) -> bool {
    match value.descriptor() {
        TypeDescriptor::Pointer(_) => value.pointee().is_none(),
        TypeDescriptor::Array(_) | TypeDescriptor::List(_) | TypeDescriptor::Map(_) => {
            value.is_empty().unwrap_or(false)
        }
        TypeDescriptor::Opaque(info) => match info.is_default_fn() {
            // SAFETY: the hook belongs to the described type.
            Some(is_default) => unsafe { is_default(value.as_ptr()) },
            None => false,
        },
        TypeDescriptor::Struct(_) | TypeDescriptor::Unsupported(_) => false,
    }
}

pub(super) struct StructSerializer<'a, 'b, 'k> {
    pub driver: &'b SerializeDriver<'a, 'k>,
}

impl Serialize for StructSerializer<'_, '_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let key = self.driver.key();

        let entries = self
            .driver
            .value()
            .fields()
            .filter_map(|(field, value)| {
                let options = FieldOptions::parse(field, key)?;
                if options.omit_empty && is_empty_value(value) {
                    return None;
                }
                Some((options.name, value))
            })
            .collect::<FastVec<_, 8>>();

        let mut state = serializer.serialize_map(Some(entries.len()))?;
        for (name, value) in entries.as_slice() {
            state.serialize_entry(name.as_ref(), &self.driver.with_value(*value))?;
        }
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use retag_ptr::Ptr;

    use super::{FieldOptions, is_empty_value};
    use crate::derived::DerivedRef;
    use crate::info::{Described, FieldDescriptor, Tag, Visibility};

    fn field(tag: &'static str) -> FieldDescriptor {
        // SAFETY: the descriptor is only used for its name and tag.
        unsafe { FieldDescriptor::new::<u8>("Label", Visibility::Public, 0) }
            .with_tag(Tag::new_static(tag))
    }

    #[test]
    fn parse_options() {
        let cases = [
            (r#"json:"-""#, None),
            (r#"json:"-,""#, Some(("-", false))),
            (r#"json:"""#, Some(("Label", false))),
            ("", Some(("Label", false))),
            (r#"json:"name""#, Some(("name", false))),
            (r#"json:",omitempty""#, Some(("Label", true))),
            (r#"json:"name,string,omitempty""#, Some(("name", true))),
            (r#"json:"name,omitempty_not""#, Some(("name", false))),
        ];

        for (tag, expected) in cases {
            let field = field(tag);
            let parsed = FieldOptions::parse(&field, "json");
            let parsed = parsed.as_ref().map(|o| (o.name.as_ref(), o.omit_empty));
            assert_eq!(parsed, expected, "tag: {tag}");
        }
    }

    fn view<T: Described>(value: &T) -> DerivedRef<'_> {
        // SAFETY: the descriptor describes `T`.
        unsafe { DerivedRef::new(Ptr::from_ref(value), T::descriptor()) }
    }

    #[test]
    fn empty_values() {
        assert!(is_empty_value(view(&0_i32)));
        assert!(!is_empty_value(view(&1_i32)));
        assert!(is_empty_value(view(&String::new())));

        assert!(is_empty_value(view(&None::<u8>)));
        assert!(!is_empty_value(view(&Some(0_u8))));

        assert!(is_empty_value(view(&Vec::<u8>::new())));
        assert!(!is_empty_value(view(&vec![1_u8])));
        assert!(is_empty_value(view(&[0_u8; 0])));
    }
}
