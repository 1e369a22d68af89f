use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

// -----------------------------------------------------------------------------
// Tag

/// A field tag, a string of space-separated `key:"value"` pairs.
///
/// Values are double-quoted; `\"`, `\\`, `\n`, `\r` and `\t` are escapes.
/// Parsing stops at the first malformed pair, so everything after it is
/// invisible to [`lookup`](Self::lookup).
///
/// Tags built at compile time (by `#[derive(Described)]`) borrow a `'static`
/// string, tags built by a [`TagRule`](crate::retag::TagRule) usually own one.
///
/// # Examples
///
/// ```
/// use retag_reflect::info::Tag;
///
/// let tag = Tag::new_static(r#"view:"user,admin" json:"name,omitempty""#);
///
/// assert_eq!(tag.lookup("view").as_deref(), Some("user,admin"));
/// assert_eq!(tag.get("json"), "name,omitempty");
/// assert_eq!(tag.lookup("xml"), None);
/// assert_eq!(tag.get("xml"), "");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Tag(Cow<'static, str>);

impl Tag {
    /// The empty tag.
    pub const EMPTY: Tag = Tag(Cow::Borrowed(""));

    /// Creates a tag from a static string without copying it.
    #[inline]
    pub const fn new_static(raw: &'static str) -> Self {
        Self(Cow::Borrowed(raw))
    }

    /// Creates a tag that owns `raw`.
    #[inline]
    pub fn from_string(raw: String) -> Self {
        Self(Cow::Owned(raw))
    }

    /// Creates a tag with a single `key:"value"` pair, quoting `value`.
    ///
    /// ```
    /// use retag_reflect::info::Tag;
    ///
    /// assert_eq!(Tag::pair("json", "-").as_str(), r#"json:"-""#);
    /// assert_eq!(Tag::pair("note", r#"say "hi""#).get("note"), r#"say "hi""#);
    /// ```
    pub fn pair(key: &str, value: &str) -> Self {
        Self::from_pairs([(key, value)])
    }

    /// Creates a tag from `(key, value)` pairs, in order.
    pub fn from_pairs<'s>(pairs: impl IntoIterator<Item = (&'s str, &'s str)>) -> Self {
        let mut raw = String::new();
        for (key, value) in pairs {
            if !raw.is_empty() {
                raw.push(' ');
            }
            raw.push_str(key);
            raw.push(':');
            push_quoted(&mut raw, value);
        }
        Self(Cow::Owned(raw))
    }

    /// Returns the raw tag text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the raw tag text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the unquoted value of `key`, or `None` if the key is absent.
    ///
    /// A present key with an empty value returns `Some("")`. The value is
    /// borrowed unless it contains escapes.
    pub fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.iter()
            .find(|(name, _)| *name == key)
            .and_then(|(_, quoted)| unquote(quoted))
    }

    /// Returns the unquoted value of `key`, or `""` if the key is absent.
    #[inline]
    pub fn get(&self, key: &str) -> Cow<'_, str> {
        self.lookup(key).unwrap_or(Cow::Borrowed(""))
    }

    /// Returns an iterator over `(key, quoted value)` pairs.
    ///
    /// Quoted values still carry their surrounding `"`.
    #[inline]
    pub fn iter(&self) -> TagIter<'_> {
        TagIter { rest: &self.0 }
    }
}

impl From<&'static str> for Tag {
    #[inline]
    fn from(raw: &'static str) -> Self {
        Self::new_static(raw)
    }
}

impl From<String> for Tag {
    #[inline]
    fn from(raw: String) -> Self {
        Self::from_string(raw)
    }
}

impl AsRef<str> for Tag {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({:?})", self.0)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

// -----------------------------------------------------------------------------
// TagIter

/// Iterator over the `(key, quoted value)` pairs of a [`Tag`].
///
/// Created by [`Tag::iter`].
#[derive(Clone, Debug)]
pub struct TagIter<'a> {
    rest: &'a str,
}

impl<'a> Iterator for TagIter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest.trim_start_matches(' ');
        let bytes = rest.as_bytes();

        // Key: printable ASCII other than space, quote and colon.
        let key_len = bytes
            .iter()
            .position(|&b| b <= b' ' || b == b':' || b == b'"' || b == 0x7f)
            .unwrap_or(bytes.len());
        if key_len == 0
            || key_len + 1 >= bytes.len()
            || bytes[key_len] != b':'
            || bytes[key_len + 1] != b'"'
        {
            self.rest = "";
            return None;
        }

        let value_start = key_len + 1;
        let mut i = value_start + 1;
        while i < bytes.len() && bytes[i] != b'"' {
            if bytes[i] == b'\\' {
                i += 1;
            }
            i += 1;
        }
        if i >= bytes.len() {
            self.rest = "";
            return None;
        }

        self.rest = &rest[i + 1..];
        Some((&rest[..key_len], &rest[value_start..=i]))
    }
}

impl core::iter::FusedIterator for TagIter<'_> {}

// -----------------------------------------------------------------------------
// Quoting

fn push_quoted(out: &mut String, value: &str) {
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

fn unquote(quoted: &str) -> Option<Cow<'_, str>> {
    let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;
    if !inner.contains('\\') {
        return Some(Cow::Borrowed(inner));
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next()? {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            _ => return None,
        }
    }
    Some(Cow::Owned(out))
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::Tag;

    #[test]
    fn lookup_pairs() {
        let tag = Tag::new_static(r#"view:"*"  json:"name,omitempty" xml:"""#);
        assert_eq!(tag.get("view"), "*");
        assert_eq!(tag.get("json"), "name,omitempty");
        assert_eq!(tag.lookup("xml").as_deref(), Some(""));
        assert_eq!(tag.lookup("yaml"), None);
    }

    #[test]
    fn parsing_stops_at_malformed_pair() {
        let tag = Tag::new_static(r#"a:"1" b:2 c:"3""#);
        assert_eq!(tag.get("a"), "1");
        assert_eq!(tag.lookup("b"), None);
        assert_eq!(tag.lookup("c"), None);

        let unterminated = Tag::new_static(r#"a:"1"#);
        assert_eq!(unterminated.lookup("a"), None);
        assert_eq!(Tag::new_static(":\"x\"").iter().count(), 0);
    }

    #[test]
    fn escapes_survive_quoting() {
        let tag = Tag::from_pairs([("note", "a \"b\" \\ c\n"), ("json", "-")]);
        assert_eq!(tag.as_str(), r#"note:"a \"b\" \\ c\n" json:"-""#);
        assert_eq!(tag.get("note"), "a \"b\" \\ c\n");
        assert_eq!(tag.get("json"), "-");

        let keys = tag.iter().map(|(k, _)| k).collect::<Vec<_>>();
        assert_eq!(keys, ["note", "json"]);
    }

    #[test]
    fn unknown_escape_is_rejected() {
        let tag = Tag::new_static(r#"a:"\q""#);
        assert_eq!(tag.lookup("a"), None);
    }
}
