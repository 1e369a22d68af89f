//! Paths into `retag_reflect` used by the generated code.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `retag_reflect` crate.
///
/// 1. For crates that depend on `retag_reflect`, `::retag_reflect` is returned.
/// 2. For crates that depend on the `retag` facade, `::retag::reflect` is returned.
/// 3. For other situations, `::retag_reflect` is returned, but this may be incorrect.
///
/// This reads the caller's Cargo.toml, so it is called once per derive and
/// the result is passed around.
pub(crate) fn retag_reflect() -> syn::Path {
    retag_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("retag_reflect"))
}

#[inline(always)]
pub(crate) fn described_(retag_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #retag_reflect_path::info::Described
    }
}

#[inline(always)]
pub(crate) fn type_descriptor_(retag_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #retag_reflect_path::info::TypeDescriptor
    }
}

#[inline(always)]
pub(crate) fn struct_info_(retag_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #retag_reflect_path::info::StructInfo
    }
}

#[inline(always)]
pub(crate) fn opaque_info_(retag_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #retag_reflect_path::info::OpaqueInfo
    }
}

#[inline(always)]
pub(crate) fn field_descriptor_(retag_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #retag_reflect_path::info::FieldDescriptor
    }
}

#[inline(always)]
pub(crate) fn visibility_(retag_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #retag_reflect_path::info::Visibility
    }
}

#[inline(always)]
pub(crate) fn tag_(retag_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #retag_reflect_path::info::Tag
    }
}

#[inline(always)]
pub(crate) fn serialize_(retag_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #retag_reflect_path::__macro_exports::Serialize
    }
}

#[inline(always)]
pub(crate) fn non_generic_descriptor_cell_(retag_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #retag_reflect_path::impls::NonGenericDescriptorCell
    }
}

#[inline(always)]
pub(crate) fn generic_descriptor_cell_(retag_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #retag_reflect_path::impls::GenericDescriptorCell
    }
}
