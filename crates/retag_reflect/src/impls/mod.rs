//! Provide [`Described`] implementations and the cells to write new ones.
//!
//! - [`NonGenericDescriptorCell`]: Used to implement [`Described`] for non-generic types.
//! - [`GenericDescriptorCell`]: Used to implement [`Described`] for generic types.
//!
//! ## Implemented Menu
//!
//! - opaque:
//!     - `()`, `bool`, `char`
//!     - `i8`-`i128`, `u8`-`u128`, `isize`, `usize`, `f32`, `f64`
//!     - `&'static str`, `String`
//! - pointer: `Box<T>` (`T` may be unsized), `Option<T>`
//! - array: `[T; N]`
//! - list: `Vec<T>`, `VecDeque<T>`
//! - map: `BTreeMap<K, V>`, `std::collections::HashMap<K, V, S>`, `hashbrown::HashMap<K, V, S>`
//! - unsupported:
//!     - `*const T`, `*mut T`
//!     - `mpsc::Sender<T>`, `mpsc::SyncSender<T>`, `mpsc::Receiver<T>`
//!     - `fn(..) -> R` with up to three arguments
//!     - `dyn Any`, `dyn Any + Send`, `dyn Any + Send + Sync`
//!
//! [`Described`]: crate::info::Described

// -----------------------------------------------------------------------------
// Modules

mod cell;

mod map;
mod native;
mod pointer;
mod sequence;
mod unsupported;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericDescriptorCell, NonGenericDescriptorCell};
