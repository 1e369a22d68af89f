//! The retagging engine.
//!
//! A [`Rule`] maps every field of a struct to a new [`Tag`]. Deriving a
//! descriptor under a rule rebuilds the struct descriptor, and every
//! descriptor reachable through public fields, with the new tags, keeping
//! types, offsets and layout. Derived descriptors are cached per
//! (descriptor, rule) pair for the life of the process.
//!
//! [`convert`] and its variants then view a value through the derived
//! descriptor without copying it.
//!
//! [`Tag`]: crate::info::Tag

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod convert;
mod error;
mod rule;
mod synth;

// -----------------------------------------------------------------------------
// Exports

pub use cache::cache_len;
pub use convert::{convert, convert_mut, derive_descriptor, try_convert, try_convert_mut};
pub use error::RetagError;
pub use rule::{Rule, RuleId, TagRule};
