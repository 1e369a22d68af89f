//! Small containers shared by the retag crates.
//!
//! - [`hash`]: hash maps with fixed and pass-through hashers.
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId).
//! - [`vec`]: re-exports of *fastvec* containers.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;
pub mod vec;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::TypeIdMap;
