use retag_ptr::{Ptr, PtrMut};

use crate::derived::{DerivedMut, DerivedRef};
use crate::info::{Described, TypeDescriptor};
use crate::retag::cache::CACHE;
use crate::retag::synth::Synthesizer;
use crate::retag::{RetagError, Rule};

/// Derives `original` under `rule`, through the process-wide cache.
///
/// Opaque descriptors, and compounds in which nothing changes, are returned
/// as they are. Every type reached on the way is cached too.
///
/// # Examples
///
/// ```
/// use retag_reflect::derive::Described;
/// use retag_reflect::info::Described;
/// use retag_reflect::retag::{Rule, derive_descriptor};
/// use retag_reflect::rules::ViewRule;
///
/// #[derive(Described)]
/// pub struct Account {
///     #[retag(view = "admin")]
///     pub balance: u64,
/// }
///
/// let admin = Rule::new(ViewRule::new("json", "admin"));
/// let derived = derive_descriptor(Account::descriptor(), &admin).unwrap();
///
/// let field = derived.as_struct().unwrap().field("balance").unwrap();
/// assert_eq!(field.tag().as_str(), "");
/// assert!(std::ptr::eq(derived, derive_descriptor(Account::descriptor(), &admin).unwrap()));
/// ```
pub fn derive_descriptor(
    original: &'static TypeDescriptor,
    rule: &Rule,
) -> Result<&'static TypeDescriptor, RetagError> {
    Synthesizer::new(&CACHE, rule)
        .derive(original)
        .inspect_err(|err| log::error!("cannot retag `{}`: {err}", original.type_path()))
}

// The views built from the result read `T` values, so a descriptor of any
// other type is refused before anything is derived.
fn derive_for<T: Described>(rule: &Rule) -> Result<&'static TypeDescriptor, RetagError> {
    let original = T::descriptor();
    if !original.type_is::<T>() {
        let err = RetagError::DescriptorMismatch {
            type_path: core::any::type_name::<T>(),
            described: original.type_path(),
        };
        log::error!("cannot retag `{}`: {err}", core::any::type_name::<T>());
        return Err(err);
    }
    derive_descriptor(original, rule)
}

/// Views `value` through the descriptor derived under `rule`.
///
/// The returned reference points at `value` itself; nothing is copied.
pub fn try_convert<'a, T: Described>(
    value: &'a T,
    rule: &Rule,
) -> Result<DerivedRef<'a>, RetagError> {
    let derived = derive_for::<T>(rule)?;
    // SAFETY: `derived` describes `T`, with the same layout and offsets.
    Ok(unsafe { DerivedRef::new(Ptr::from_ref(value), derived) })
}

/// Views `value` mutably through the descriptor derived under `rule`.
///
/// Writes through the returned reference land in `value`.
pub fn try_convert_mut<'a, T: Described>(
    value: &'a mut T,
    rule: &Rule,
) -> Result<DerivedMut<'a>, RetagError> {
    let derived = derive_for::<T>(rule)?;
    // SAFETY: see `try_convert`.
    Ok(unsafe { DerivedMut::new(PtrMut::from_mut(value), derived) })
}

/// Views `value` through the descriptor derived under `rule`.
///
/// # Panics
///
/// Panics with the [`RetagError`] message if `T` cannot be retagged. Such
/// a failure is a defect in `T`'s definition; use [`try_convert`] to
/// observe it instead.
///
/// # Examples
///
/// ```
/// use retag_reflect::derive::Described;
/// use retag_reflect::retag::{Rule, convert};
/// use retag_reflect::rules::ViewRule;
///
/// #[derive(Described)]
/// pub struct Profile {
///     #[retag(view = "*")]
///     pub name: String,
///     #[retag(view = "admin")]
///     pub email: String,
/// }
///
/// let profile = Profile { name: "ada".into(), email: "ada@example.com".into() };
/// let public = Rule::new(ViewRule::new("json", "public"));
///
/// let view = convert(&profile, &public);
/// let json = serde_json::to_string(&view.serialize_with("json")).unwrap();
/// assert_eq!(json, r#"{"name":"ada"}"#);
/// ```
#[track_caller]
pub fn convert<'a, T: Described>(value: &'a T, rule: &Rule) -> DerivedRef<'a> {
    match try_convert(value, rule) {
        Ok(derived) => derived,
        Err(err) => panic!("{err}"),
    }
}

/// Views `value` mutably through the descriptor derived under `rule`.
///
/// # Panics
///
/// Panics with the [`RetagError`] message if `T` cannot be retagged.
#[track_caller]
pub fn convert_mut<'a, T: Described>(value: &'a mut T, rule: &Rule) -> DerivedMut<'a> {
    match try_convert_mut(value, rule) {
        Ok(derived) => derived,
        Err(err) => panic!("{err}"),
    }
}
