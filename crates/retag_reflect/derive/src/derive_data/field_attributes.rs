use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Attribute, Expr, ExprLit, Lit, LitStr, Meta, Token};

use crate::RETAG_ATTRIBUTE_NAME;

/// The key that takes a raw tag string instead of a single value.
const RAW_TAG_KEY: &str = "tag";

/// Field-level `#[retag(...)]` attributes, collected into the field's tag.
///
/// - `key = "value"`: adds the pair `key:"value"`.
/// - `tag = "raw"`: prepends a raw tag string, for keys that are not identifiers.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    raw: Option<LitStr>,
    pairs: Vec<(String, LitStr)>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(RETAG_ATTRIBUTE_NAME) {
                continue;
            }
            let metas = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
            for meta in metas {
                result.parse_meta(&meta)?;
            }
        }

        Ok(result)
    }

    fn parse_meta(&mut self, meta: &Meta) -> syn::Result<()> {
        let Meta::NameValue(pair) = meta else {
            return Err(syn::Error::new(
                meta.span(),
                "expected `key = \"value\"` at the field level",
            ));
        };

        let Some(ident) = pair.path.get_ident() else {
            return Err(syn::Error::new(pair.path.span(), "expected an identifier key"));
        };

        let Expr::Lit(ExprLit {
            lit: Lit::Str(value),
            ..
        }) = &pair.value
        else {
            return Err(syn::Error::new(
                pair.value.span(),
                "expected a string literal value",
            ));
        };

        let key = ident.unraw().to_string();
        if key == RAW_TAG_KEY {
            if self.raw.is_some() {
                return Err(syn::Error::new(ident.span(), "duplicate `tag`"));
            }
            self.raw = Some(value.clone());
            return Ok(());
        }

        if self.pairs.iter().any(|(k, _)| *k == key) {
            return Err(syn::Error::new(ident.span(), format!("duplicate key `{key}`")));
        }
        self.pairs.push((key, value.clone()));
        Ok(())
    }

    /// Returns the complete tag text, `None` when the field has no tag.
    pub fn tag_string(&self) -> Option<String> {
        let mut out = self
            .raw
            .as_ref()
            .map(|raw| raw.value().trim().to_owned())
            .unwrap_or_default();

        for (key, value) in &self.pairs {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(key);
            out.push(':');
            push_quoted(&mut out, &value.value());
        }

        (!out.is_empty()).then_some(out)
    }
}

// Same escapes as `retag_reflect::info::Tag`.
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
