//! Lightweight pointer wrappers used by derived references.
//!
//! A derived reference reads the memory of an original value through a type
//! descriptor instead of a Rust type. The pointer it holds therefore has to be
//! type-erased, but it must still carry the lifetime of the original borrow so
//! the borrow checker keeps the original alive.
//!
//! **Ptr** and **PtrMut**
//!
//! [`Ptr<'a>`] and [`PtrMut<'a>`] are type-erased `&T` and `&mut T` equivalents.
//! Compared to raw pointers, they add a lifetime and debug-build alignment checks to
//! better approximate the safety of references.
#![expect(unsafe_code, reason = "Raw pointers are inherently unsafe.")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Modules

mod type_erased;

// -----------------------------------------------------------------------------
// Top-level exports

pub use type_erased::{Ptr, PtrMut};
