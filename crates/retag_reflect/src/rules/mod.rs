//! Ready-made [`TagRule`](crate::retag::TagRule)s.
//!
//! - [`ViewRule`]: keeps the fields that list a named view, hides the rest.
//! - [`SnakeRule`]: names every field in snake case.

mod snake;
mod view;

pub use snake::{SnakeRule, to_snake_case};
pub use view::ViewRule;
