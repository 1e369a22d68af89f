use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive_data::DescribedDerive;

/// Provided for `#[derive(Described)]`.
pub(crate) fn match_described_impls(ast: DeriveInput) -> TokenStream {
    // Parse type kind, attributes and fields.
    let described_derive = match DescribedDerive::from_input(&ast) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    let described_impls: proc_macro2::TokenStream = match described_derive {
        DescribedDerive::Struct(info) => crate::impls::impl_struct(&info),
        DescribedDerive::Opaque(meta) => crate::impls::impl_opaque(&meta),
    };

    TokenStream::from(quote! {
        const _: () = {
            #described_impls
        };
    })
}
