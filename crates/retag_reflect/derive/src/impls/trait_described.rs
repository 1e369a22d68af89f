use proc_macro2::TokenStream;
use quote::quote;
use syn::Type;

use crate::derive_data::DescribedMeta;

/// Generate implementation code for `Described`.
///
/// `descriptor_tokens` builds the `TypeDescriptor`, it runs once per type.
/// `described_types` are the field types that must be `Described` for a
/// generic type.
pub(crate) fn impl_trait_described(
    meta: &DescribedMeta,
    descriptor_tokens: TokenStream,
    described_types: &[&Type],
) -> TokenStream {
    let retag_reflect_path = meta.retag_reflect_path();
    let described_ = crate::path::described_(retag_reflect_path);
    let type_descriptor_ = crate::path::type_descriptor_(retag_reflect_path);

    let inner_cell_tokens = if meta.is_generic() {
        let cell_ = crate::path::generic_descriptor_cell_(retag_reflect_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_insert::<Self>(|| {
                #descriptor_tokens
            })
        }
    } else {
        let cell_ = crate::path::non_generic_descriptor_cell_(retag_reflect_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_init(|| {
                #descriptor_tokens
            })
        }
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(described_types);

    quote! {
        #[allow(unsafe_code)]
        // SAFETY: the descriptor is built from the type definition, with
        // `offset_of!` for every field.
        unsafe impl #impl_generics #described_ for #ident #ty_generics #where_clause {
            fn descriptor() -> &'static #type_descriptor_ {
                #inner_cell_tokens
            }
        }
    }
}
