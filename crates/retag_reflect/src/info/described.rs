use crate::info::TypeDescriptor;

/// A type with a static [`TypeDescriptor`].
///
/// Usually implemented with `#[derive(Described)]`. Hand-written impls store
/// the descriptor in a [`NonGenericDescriptorCell`] or, for generic types, a
/// [`GenericDescriptorCell`].
///
/// # Safety
///
/// Derived references read and write `Self` values through the returned
/// descriptor. It must describe `Self` exactly: same `TypeId` and layout,
/// every field offset and field type as declared, and every access function
/// valid for `Self` values. Conversion rejects a descriptor of another type,
/// but cannot check the rest.
///
/// # Examples
///
/// ```
/// use retag_reflect::impls::NonGenericDescriptorCell;
/// use retag_reflect::info::{Described, OpaqueInfo, TypeDescriptor};
///
/// #[derive(serde::Serialize)]
/// struct Meters(f64);
///
/// // SAFETY: an opaque descriptor of `Meters` with its own serialize hook.
/// unsafe impl Described for Meters {
///     fn descriptor() -> &'static TypeDescriptor {
///         static CELL: NonGenericDescriptorCell = NonGenericDescriptorCell::new();
///         CELL.get_or_init(|| {
///             TypeDescriptor::Opaque(OpaqueInfo::new::<Self>().with_serialize::<Self>())
///         })
///     }
/// }
///
/// assert!(Meters::descriptor().type_is::<Meters>());
/// ```
///
/// [`NonGenericDescriptorCell`]: crate::impls::NonGenericDescriptorCell
/// [`GenericDescriptorCell`]: crate::impls::GenericDescriptorCell
pub unsafe trait Described: 'static {
    /// Returns the descriptor of `Self`, built on first use.
    fn descriptor() -> &'static TypeDescriptor;
}
