use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{GenericParam, Generics, Ident, Path, Type, WhereClause};

use super::TypeAttributes;

/// Type-level data shared by every kind of derive.
pub(crate) struct DescribedMeta<'a> {
    retag_reflect_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
}

impl<'a> DescribedMeta<'a> {
    pub fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> syn::Result<Self> {
        if let Some(lifetime) = generics.lifetimes().next() {
            return Err(syn::Error::new(
                lifetime.span(),
                "`Described` types must be `'static`, lifetime parameters are not supported",
            ));
        }

        Ok(Self {
            retag_reflect_path: crate::path::retag_reflect(),
            attrs,
            ident,
            generics,
        })
    }

    #[inline]
    pub fn retag_reflect_path(&self) -> &Path {
        &self.retag_reflect_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    /// Generic types share one cell per generic item and key it by `TypeId`.
    #[inline]
    pub fn is_generic(&self) -> bool {
        self.generics
            .params
            .iter()
            .any(|param| !matches!(param, GenericParam::Lifetime(_)))
    }

    /// Split generics, adding `'static` to type parameters and the given
    /// `Described` bounds to the where clause.
    pub fn split_generics(&self, described_types: &[&Type]) -> (TokenStream, TokenStream, WhereClause) {
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let mut where_clause = where_clause.cloned().unwrap_or_else(|| WhereClause {
            where_token: Default::default(),
            predicates: Default::default(),
        });

        if self.is_generic() {
            let described_ = crate::path::described_(&self.retag_reflect_path);

            for param in self.generics.type_params() {
                let ident = &param.ident;
                where_clause.predicates.push(syn::parse_quote!(#ident: 'static));
            }
            for ty in described_types {
                where_clause.predicates.push(syn::parse_quote!(#ty: #described_));
            }
            if self.attrs.serialize.is_some() {
                let serialize_ = crate::path::serialize_(&self.retag_reflect_path);
                where_clause.predicates.push(syn::parse_quote!(Self: #serialize_));
            }
            if self.attrs.default.is_some() {
                where_clause.predicates.push(syn::parse_quote!(
                    Self: ::core::default::Default + ::core::cmp::PartialEq
                ));
            }
        }

        (quote!(#impl_generics), quote!(#ty_generics), where_clause)
    }
}
