use syn::{Data, DeriveInput, Fields};

use super::{DescribedMeta, DescribedStruct, TypeAttributes};

/// The parsed derive input, by the kind of descriptor it produces.
pub(crate) enum DescribedDerive<'a> {
    /// A struct with named fields, or a unit struct.
    Struct(DescribedStruct<'a>),
    /// A `#[retag(opaque)]` type of any shape.
    Opaque(DescribedMeta<'a>),
}

impl<'a> DescribedDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let is_opaque = attrs.opaque.is_some();
        let meta = DescribedMeta::new(attrs, &input.ident, &input.generics)?;

        if is_opaque {
            return Ok(Self::Opaque(meta));
        }

        match &input.data {
            Data::Struct(data) => match &data.fields {
                fields @ (Fields::Named(_) | Fields::Unit) => {
                    Ok(Self::Struct(DescribedStruct::new(meta, fields)?))
                }
                Fields::Unnamed(_) => Err(syn::Error::new_spanned(
                    &input.ident,
                    "tuple structs need `#[retag(opaque)]`",
                )),
            },
            Data::Enum(_) => Err(syn::Error::new_spanned(
                &input.ident,
                "enums need `#[retag(opaque)]`",
            )),
            Data::Union(_) => Err(syn::Error::new_spanned(
                &input.ident,
                "unions cannot be described",
            )),
        }
    }
}
