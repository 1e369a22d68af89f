use alloc::sync::Arc;
use core::fmt;

use crate::info::{StructInfo, Tag};

// -----------------------------------------------------------------------------
// TagRule

/// A policy producing the tag of each field of a derived struct.
///
/// `make_tag` receives the *original* struct descriptor and the field index.
/// It is called once per field when the derived descriptor is built, never
/// again for the same (type, rule) pair, so it must be deterministic.
///
/// Plain functions and closures with the right signature are rules:
///
/// ```
/// use retag_reflect::info::{StructInfo, Tag};
/// use retag_reflect::retag::Rule;
///
/// let keep = Rule::new(|owner: &StructInfo, index: usize| {
///     owner.field_at(index).map(|f| f.tag().clone()).unwrap_or_default()
/// });
/// # let _ = keep;
/// ```
pub trait TagRule: Send + Sync + 'static {
    /// Returns the tag of field `field_index` of `owner` in the derived type.
    fn make_tag(&self, owner: &StructInfo, field_index: usize) -> Tag;
}

impl<F> TagRule for F
where
    F: Fn(&StructInfo, usize) -> Tag + Send + Sync + 'static,
{
    #[inline]
    fn make_tag(&self, owner: &StructInfo, field_index: usize) -> Tag {
        self(owner, field_index)
    }
}

// -----------------------------------------------------------------------------
// Rule

/// Identity of a [`Rule`], the address of its shared allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleId(usize);

/// A shared handle to a [`TagRule`].
///
/// Derived descriptors are cached per rule *handle*: clones of one `Rule`
/// share cached descriptors, while two `Rule::new` calls never do, even for
/// identical policies. Create a rule once (for instance in a `static`
/// `LazyLock`) and reuse it.
///
/// # Examples
///
/// ```
/// use retag_reflect::retag::Rule;
/// use retag_reflect::rules::ViewRule;
///
/// let a = Rule::new(ViewRule::new("json", "user"));
/// let b = Rule::new(ViewRule::new("json", "user"));
///
/// assert_eq!(a.id(), a.clone().id());
/// assert_ne!(a.id(), b.id());
/// ```
#[derive(Clone)]
pub struct Rule(Arc<dyn TagRule>);

impl Rule {
    /// Wraps `rule` in a new handle with a fresh identity.
    #[inline]
    pub fn new(rule: impl TagRule) -> Self {
        Self(Arc::new(rule))
    }

    /// Returns the identity of this handle.
    #[inline]
    pub fn id(&self) -> RuleId {
        RuleId(Arc::as_ptr(&self.0).cast::<()>().addr())
    }

    /// Calls the wrapped [`TagRule`].
    #[inline]
    pub fn make_tag(&self, owner: &StructInfo, field_index: usize) -> Tag {
        self.0.make_tag(owner, field_index)
    }
}

impl PartialEq for Rule {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Rule {}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule({:#x})", self.id().0)
    }
}
