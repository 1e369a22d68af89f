use core::alloc::Layout;

use thiserror::Error;

use crate::info::TypeKind;

// -----------------------------------------------------------------------------
// Error

/// A failure to derive a descriptor.
///
/// Every variant is a defect in the described types, not a runtime
/// condition: the conversion stops and nothing is cached for the failing
/// type.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RetagError {
    #[error("cannot retag {kind} type `{type_path}`")]
    UnsupportedFieldKind {
        type_path: &'static str,
        kind: TypeKind,
    },

    #[error(
        "derived layout of `{type_path}` (size {}, align {}) differs from the original (size {}, align {})",
        .derived.size(), .derived.align(), .original.size(), .original.align()
    )]
    LayoutInvariantViolation {
        type_path: &'static str,
        original: Layout,
        derived: Layout,
    },

    #[error("`{type_path}` is described by the descriptor of `{described}`")]
    DescriptorMismatch {
        type_path: &'static str,
        described: &'static str,
    },
}
