use alloc::borrow::Cow;
use alloc::string::String;

use crate::info::{StructInfo, Tag};
use crate::retag::TagRule;

/// Names every field in `snake_case` under one tag key.
///
/// An existing non-empty value under `key` is kept; otherwise the field
/// name is converted, with an underscore before each upper-case letter
/// except the first (`cardNumber` and `CardNumber` both give
/// `card_number`). Rust field names are usually snake case already and pass
/// through unchanged.
///
/// # Examples
///
/// ```
/// use retag_reflect::derive::Described;
/// use retag_reflect::retag::{Rule, convert};
/// use retag_reflect::rules::SnakeRule;
///
/// #[derive(Described)]
/// #[allow(non_snake_case)]
/// pub struct Record {
///     #[retag(json = "_id")]
///     pub Id: i64,
///     pub displayName: String,
/// }
///
/// let record = Record { Id: 7, displayName: "Duke".into() };
/// let snake = Rule::new(SnakeRule::new("json"));
///
/// let json = serde_json::to_string(&convert(&record, &snake).serialize_with("json")).unwrap();
/// assert_eq!(json, r#"{"_id":7,"display_name":"Duke"}"#);
/// ```
#[derive(Debug, Clone)]
pub struct SnakeRule {
    key: Cow<'static, str>,
}

impl SnakeRule {
    /// Creates a rule that emits snake case names under `key`.
    pub fn new(key: impl Into<Cow<'static, str>>) -> Self {
        Self { key: key.into() }
    }

    /// Returns the emitted tag key.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl TagRule for SnakeRule {
    fn make_tag(&self, owner: &StructInfo, field_index: usize) -> Tag {
        let Some(field) = owner.field_at(field_index) else {
            return Tag::EMPTY;
        };
        match field.tag().lookup(&self.key) {
            Some(value) if !value.is_empty() => Tag::pair(&self.key, &value),
            _ => Tag::pair(&self.key, &to_snake_case(field.name())),
        }
    }
}

/// Converts `CamelCase` or `camelCase` to `snake_case`.
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (index, ch) in name.char_indices() {
        if ch.is_uppercase() {
            if index > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::to_snake_case;

    #[test]
    fn snake_case() {
        assert_eq!(to_snake_case("CardNumber"), "card_number");
        assert_eq!(to_snake_case("supportNote"), "support_note");
        assert_eq!(to_snake_case("id"), "id");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case("ID"), "i_d");
    }
}
