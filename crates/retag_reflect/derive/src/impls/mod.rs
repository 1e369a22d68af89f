//! Code generation for `#[derive(Described)]`.

// -----------------------------------------------------------------------------
// Modules

mod match_described;
mod opaque_kind;
mod struct_kind;
mod trait_described;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use match_described::match_described_impls;

use opaque_kind::impl_opaque;
use struct_kind::impl_struct;
use trait_described::impl_trait_described;
