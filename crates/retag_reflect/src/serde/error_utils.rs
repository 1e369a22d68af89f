use core::fmt::Display;

use serde_core::ser::Error;

use crate::info::TypeDescriptor;

#[cfg(all(debug_assertions, feature = "debug"))]
std::thread_local! {
    static TYPE_STACK: core::cell::RefCell<alloc::vec::Vec<&'static str>> =
        const { core::cell::RefCell::new(alloc::vec::Vec::new()) };
}

/// Records the type being serialized until dropped.
///
/// Without the `debug` feature (or without `debug_assertions`) this does nothing.
pub(super) struct TypeScope;

impl TypeScope {
    #[inline]
    pub(super) fn enter(descriptor: &'static TypeDescriptor) -> Self {
        #[cfg(all(debug_assertions, feature = "debug"))]
        TYPE_STACK.with_borrow_mut(|stack| stack.push(descriptor.type_path()));
        #[cfg(not(all(debug_assertions, feature = "debug")))]
        let _ = descriptor;
        TypeScope
    }
}

impl Drop for TypeScope {
    #[inline]
    fn drop(&mut self) {
        #[cfg(all(debug_assertions, feature = "debug"))]
        TYPE_STACK.with_borrow_mut(|stack| {
            stack.pop();
        });
    }
}

/// A helper function for generating a custom serialization error message.
///
/// This function should be preferred over [`Error::custom`] as it will include
/// the chain of types being serialized when the `debug` feature is enabled.
#[inline]
pub(super) fn make_custom_error<E: Error>(msg: impl Display) -> E {
    #[cfg(all(debug_assertions, feature = "debug"))]
    return TYPE_STACK.with_borrow(|stack| {
        E::custom(format_args!("{msg} (stack: `{}`)", stack.join("` -> `")))
    });

    #[cfg(not(all(debug_assertions, feature = "debug")))]
    E::custom(msg)
}
