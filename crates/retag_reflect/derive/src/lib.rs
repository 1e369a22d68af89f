//! See [`Described`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static RETAG_ATTRIBUTE_NAME: &str = "retag";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Descriptor Derivation
///
/// `#[derive(Described)]` implements `Described`, building the type's
/// `TypeDescriptor` once on first use.
///
/// - Structs with named fields become `Struct` descriptors. Every field
///   type must itself implement `Described`.
/// - Unit structs become `Struct` descriptors without fields.
/// - Tuple structs and enums must be marked `#[retag(opaque)]`.
///
/// Types with lifetime parameters are rejected. Generic types get
/// `T: 'static` and `FieldType: Described` bounds.
///
/// ## Field Tags
///
/// Each `key = "value"` in a field's `#[retag(...)]` becomes a `key:"value"`
/// pair of the field's tag, in order. Use `tag = "..."` for raw tag text,
/// for keys that are not Rust identifiers; it is placed before the pairs.
///
/// ```rust, ignore
/// #[derive(Described)]
/// pub struct User {
///     #[retag(view = "*", json = "name,omitempty")]
///     pub name: String,
///     #[retag(tag = r#"x-db:"pk""#, json = "id")]
///     pub id: u64,
/// }
/// // name: `view:"*" json:"name,omitempty"`
/// // id:   `x-db:"pk" json:"id"`
/// ```
///
/// Only plain `pub` fields are public. `pub(crate)` and narrower fields are
/// private: they never show up in derived views.
///
/// ## Type Flags
///
/// - `opaque`: describe the type as a whole. Its internals are never retagged.
/// - `serialize`: serialize values with the type's own `serde::Serialize`.
///   Without it, opaque types cannot be serialized and structs are
///   serialized field by field.
/// - `default`: the opaque type implements `Default + PartialEq`, so
///   `omitempty` can skip default values.
///
/// ```rust, ignore
/// #[derive(Described, Serialize, Default, PartialEq)]
/// #[retag(opaque, serialize, default)]
/// pub struct Money(i64);
/// ```
#[proc_macro_derive(Described, attributes(retag))]
pub fn derive_described(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_described_impls(ast)
}
