use proc_macro2::TokenStream;

use super::impl_trait_described;

use crate::derive_data::DescribedStruct;

/// Implement `Described` for a struct with named fields or a unit struct.
pub(crate) fn impl_struct(info: &DescribedStruct) -> TokenStream {
    let field_types = info.field_types();
    impl_trait_described(info.meta(), info.to_descriptor_tokens(), &field_types)
}
