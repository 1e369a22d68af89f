use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Fields, Ident, Type, Visibility};

use super::{DescribedMeta, FieldAttributes};

/// A named field of a derived struct.
pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub is_public: bool,
    pub attrs: FieldAttributes,
}

/// A struct with named fields, or a unit struct.
pub(crate) struct DescribedStruct<'a> {
    meta: DescribedMeta<'a>,
    fields: Vec<StructField<'a>>,
}

impl<'a> DescribedStruct<'a> {
    pub fn new(meta: DescribedMeta<'a>, fields: &'a Fields) -> syn::Result<Self> {
        let fields = fields
            .iter()
            .map(|field| {
                let ident = field.ident.as_ref().ok_or_else(|| {
                    syn::Error::new_spanned(field, "tuple structs need `#[retag(opaque)]`")
                })?;
                Ok(StructField {
                    ident,
                    ty: &field.ty,
                    is_public: matches!(field.vis, Visibility::Public(_)),
                    attrs: FieldAttributes::parse_attrs(&field.attrs)?,
                })
            })
            .collect::<syn::Result<Vec<_>>>()?;

        Ok(Self { meta, fields })
    }

    #[inline]
    pub fn meta(&self) -> &DescribedMeta<'a> {
        &self.meta
    }

    /// Field types, for the `Described` bounds of generic structs.
    pub fn field_types(&self) -> Vec<&'a Type> {
        self.fields.iter().map(|field| field.ty).collect()
    }

    /// Generate the descriptor expression.
    ///
    /// Similar to following:
    ///
    /// ```ignore
    /// _path_::TypeDescriptor::Struct(
    ///     _path_::StructInfo::new::<Self>(From::from([
    ///         unsafe { _path_::FieldDescriptor::new::<u32>("id", Public, offset_of!(Self, id)) }
    ///             .with_tag(_path_::Tag::new_static("json:\"id\"")),
    ///         ......
    ///     ]))
    /// )
    /// ```
    pub fn to_descriptor_tokens(&self) -> TokenStream {
        let retag_reflect_path = self.meta.retag_reflect_path();
        let type_descriptor_ = crate::path::type_descriptor_(retag_reflect_path);
        let struct_info_ = crate::path::struct_info_(retag_reflect_path);
        let field_descriptor_ = crate::path::field_descriptor_(retag_reflect_path);
        let visibility_ = crate::path::visibility_(retag_reflect_path);
        let tag_ = crate::path::tag_(retag_reflect_path);

        let fields = self.fields.iter().map(|field| {
            let ident = field.ident;
            let ty = field.ty;
            let name = ident.unraw().to_string();
            let visibility = if field.is_public {
                quote!(#visibility_::Public)
            } else {
                quote!(#visibility_::Private)
            };
            let with_tag = field
                .attrs
                .tag_string()
                .map(|tag| quote!(.with_tag(#tag_::new_static(#tag))));

            quote! {
                // SAFETY: the offset is the offset of this field in `Self`.
                unsafe {
                    #field_descriptor_::new::<#ty>(
                        #name,
                        #visibility,
                        ::core::mem::offset_of!(Self, #ident),
                    )
                }
                #with_tag
            }
        });

        let with_serialize = self
            .meta
            .attrs()
            .serialize
            .map(|_| quote!(.with_serialize::<Self>()));

        quote! {
            #type_descriptor_::Struct(
                #struct_info_::new::<Self>(::core::convert::From::from([
                    #(#fields),*
                ]))
                #with_serialize
            )
        }
    }
}
