use proc_macro2::Span;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Attribute, Meta, Token};

use crate::RETAG_ATTRIBUTE_NAME;

/// Type-level `#[retag(...)]` flags.
///
/// - `opaque`: describe the type as a whole instead of by its fields.
/// - `serialize`: serialize values with the type's own `Serialize` impl.
/// - `default`: the type implements `Default + PartialEq`, used by `omitempty`.
///   Only valid together with `opaque`.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    pub opaque: Option<Span>,
    pub serialize: Option<Span>,
    pub default: Option<Span>,
}

impl TypeAttributes {
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

        result.validity()?;
        Ok(result)
    }

    fn parse_meta(&mut self, meta: &Meta) -> syn::Result<()> {
        let Meta::Path(path) = meta else {
            return Err(syn::Error::new(
                meta.span(),
                "expected one of `opaque`, `serialize` or `default` at the type level",
            ));
        };

        let slot = if path.is_ident("opaque") {
            &mut self.opaque
        } else if path.is_ident("serialize") {
            &mut self.serialize
        } else if path.is_ident("default") {
            &mut self.default
        } else {
            return Err(syn::Error::new(
                path.span(),
                "unknown flag, expected `opaque`, `serialize` or `default`",
            ));
        };

        if slot.is_some() {
            return Err(syn::Error::new(path.span(), "duplicate flag"));
        }
        *slot = Some(path.span());
        Ok(())
    }

    fn validity(&self) -> syn::Result<()> {
        if let Some(span) = self.default
            && self.opaque.is_none()
        {
            return Err(syn::Error::new(
                span,
                "`default` is only supported on `#[retag(opaque)]` types",
            ));
        }
        Ok(())
    }
}
