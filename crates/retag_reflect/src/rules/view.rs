use alloc::borrow::Cow;

use crate::info::{StructInfo, Tag};
use crate::retag::TagRule;

/// Selects the fields that belong to one named view.
///
/// Each field lists its views in a `view` tag: a comma-separated list of
/// names, or `*` for every view. For a field in the view, the rule keeps the
/// field's existing value under `key` (or emits an empty tag if there is
/// none). Every other field, including fields without a `view` tag, gets
/// `key:"-"` and is left out of serialization.
///
/// | field tag                              | `ViewRule::new("json", "admin")` |
/// |----------------------------------------|----------------------------------|
/// | (none)                                 | `json:"-"`                       |
/// | `view:"user"`                          | `json:"-"`                       |
/// | `view:"*"`                             | (empty)                          |
/// | `view:"admin"`                         | (empty)                          |
/// | `view:"user,admin"`                    | (empty)                          |
/// | `view:"admin" json:"Name,omitempty"`   | `json:"Name,omitempty"`          |
///
/// # Examples
///
/// ```
/// use retag_reflect::derive::Described;
/// use retag_reflect::retag::{Rule, convert};
/// use retag_reflect::rules::ViewRule;
///
/// #[derive(Described)]
/// pub struct UserProfile {
///     pub id: i64,
///     #[retag(view = "*")]
///     pub name: String,
///     #[retag(view = "user")]
///     pub card_number: String,
///     #[retag(view = "support")]
///     pub support_note: String,
/// }
///
/// let profile = UserProfile {
///     id: 7,
///     name: "Duke Nukem".into(),
///     card_number: "4378 0990 7823 1019".into(),
///     support_note: "Strange customer".into(),
/// };
///
/// let user = Rule::new(ViewRule::new("json", "user"));
/// let json = serde_json::to_string(&convert(&profile, &user).serialize_with("json")).unwrap();
/// assert_eq!(json, r#"{"name":"Duke Nukem","card_number":"4378 0990 7823 1019"}"#);
/// ```
#[derive(Debug, Clone)]
pub struct ViewRule {
    key: Cow<'static, str>,
    view: Cow<'static, str>,
}

impl ViewRule {
    /// The tag key that lists a field's views.
    pub const VIEW_KEY: &'static str = "view";

    /// The view name that matches every view.
    pub const ANY_VIEW: &'static str = "*";

    /// Creates a rule that emits tags under `key` for the view named `view`.
    pub fn new(key: impl Into<Cow<'static, str>>, view: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key: key.into(),
            view: view.into(),
        }
    }

    /// Returns the emitted tag key.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the view name.
    #[inline]
    pub fn view(&self) -> &str {
        &self.view
    }

    /// Check if a `view` tag value selects this rule's view.
    pub fn matches(&self, views: &str) -> bool {
        views == Self::ANY_VIEW || views.split(',').any(|name| name == self.view)
    }
}

impl TagRule for ViewRule {
    fn make_tag(&self, owner: &StructInfo, field_index: usize) -> Tag {
        let Some(field) = owner.field_at(field_index) else {
            return Tag::pair(&self.key, "-");
        };
        let tag = field.tag();
        if !self.matches(&tag.get(Self::VIEW_KEY)) {
            return Tag::pair(&self.key, "-");
        }
        match tag.lookup(&self.key) {
            Some(value) if !value.is_empty() => Tag::pair(&self.key, &value),
            _ => Tag::EMPTY,
        }
    }
}
