use proc_macro2::TokenStream;
use quote::quote;

use super::impl_trait_described;

use crate::derive_data::DescribedMeta;

/// Implement `Described` for a `#[retag(opaque)]` type.
///
/// Similar to following:
///
/// ```ignore
/// _path_::TypeDescriptor::Opaque(
///     _path_::OpaqueInfo::new::<Self>()
///         .with_serialize::<Self>()   // `serialize`
///         .with_is_default::<Self>()  // `default`
/// )
/// ```
pub(crate) fn impl_opaque(meta: &DescribedMeta) -> TokenStream {
    let retag_reflect_path = meta.retag_reflect_path();
    let type_descriptor_ = crate::path::type_descriptor_(retag_reflect_path);
    let opaque_info_ = crate::path::opaque_info_(retag_reflect_path);

    let with_serialize = meta
        .attrs()
        .serialize
        .map(|_| quote!(.with_serialize::<Self>()));
    let with_is_default = meta
        .attrs()
        .default
        .map(|_| quote!(.with_is_default::<Self>()));

    let descriptor_tokens = quote! {
        #type_descriptor_::Opaque(
            #opaque_info_::new::<Self>()
                #with_serialize
                #with_is_default
        )
    };

    impl_trait_described(meta, descriptor_tokens, &[])
}
