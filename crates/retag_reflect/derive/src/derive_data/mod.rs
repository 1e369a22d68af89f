//! Parsing of derive input and `#[retag(...)]` attributes.

// -----------------------------------------------------------------------------
// Modules

mod described_derive;
mod described_meta;
mod described_struct;
mod field_attributes;
mod type_attributes;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use described_derive::DescribedDerive;
pub(crate) use described_meta::DescribedMeta;
pub(crate) use described_struct::DescribedStruct;
pub(crate) use field_attributes::FieldAttributes;
pub(crate) use type_attributes::TypeAttributes;
