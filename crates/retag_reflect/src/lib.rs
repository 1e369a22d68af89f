//! Retagging: rewrite the field tags of a type at runtime and view existing
//! values through the rewritten type, without copying them.
//!
//! - [`info`]: type descriptors, struct fields and their tags.
//! - [`impls`]: descriptors for std types and the cells that cache them.
//! - [`retag`]: tag rules, the derived-descriptor cache and `convert`.
//! - [`derived`]: references that read values through derived descriptors.
//! - [`rules`]: ready-made rules, [`ViewRule`](rules::ViewRule) and
//!   [`SnakeRule`](rules::SnakeRule).
//! - [`serde`]: serialization of derived references.
//!
//! # Examples
//!
//! ```
//! use retag_reflect::derive::Described;
//! use retag_reflect::retag::{Rule, convert};
//! use retag_reflect::rules::ViewRule;
//!
//! #[derive(Described)]
//! pub struct Account {
//!     #[retag(view = "*", json = "login")]
//!     pub login: String,
//!     #[retag(view = "admin", json = "balance")]
//!     pub balance: i64,
//! }
//!
//! let account = Account { login: "ada".into(), balance: 42 };
//!
//! let public = convert(&account, &Rule::new(ViewRule::new("json", "guest")));
//! let json = serde_json::to_string(&public.serialize_with("json")).unwrap();
//! assert_eq!(json, r#"{"login":"ada"}"#);
//!
//! let admin = convert(&account, &Rule::new(ViewRule::new("json", "admin")));
//! let json = serde_json::to_string(&admin.serialize_with("json")).unwrap();
//! assert_eq!(json, r#"{"login":"ada","balance":42}"#);
//! ```
#![expect(unsafe_code, reason = "Derived references read memory through descriptors.")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Derive output names `retag_reflect`, which must also resolve inside this crate.
extern crate self as retag_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod derived;
pub mod impls;
pub mod info;
pub mod retag;
pub mod rules;
pub mod serde;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use derived::{DerivedMut, DerivedRef};
pub use info::{Described, Tag, TypeDescriptor};
pub use retag::{Rule, RetagError, TagRule, convert, convert_mut, try_convert, try_convert_mut};

#[cfg(feature = "derive")]
pub use retag_reflect_derive as derive;

#[doc(hidden)]
pub mod __macro_exports {
    //! Items named by `#[derive(Described)]` output.

    pub use serde_core::Serialize;
}
