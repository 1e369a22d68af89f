//! Counts cache entries; kept in its own test binary so no other test
//! touches the process-wide cache concurrently.

use retag_reflect::derive::Described;
use retag_reflect::info::Described;
use retag_reflect::retag::{Rule, cache_len, derive_descriptor};
use retag_reflect::rules::ViewRule;

#[derive(Described)]
pub struct Leaf {
    #[retag(view = "*")]
    pub x: i32,
}

#[derive(Described)]
pub struct Branch {
    #[retag(view = "*")]
    pub leaves: Vec<Leaf>,
    #[retag(view = "*")]
    pub label: String,
}

#[test]
fn cache_grows_once_per_type_and_rule() {
    let before = cache_len();

    let first = Rule::new(ViewRule::new("json", "a"));
    derive_descriptor(Branch::descriptor(), &first).unwrap();
    // `Branch`, `Vec<Leaf>` and `Leaf`; opaque types are never cached.
    assert_eq!(cache_len(), before + 3);

    derive_descriptor(Branch::descriptor(), &first).unwrap();
    derive_descriptor(Leaf::descriptor(), &first.clone()).unwrap();
    assert_eq!(cache_len(), before + 3);

    let second = Rule::new(ViewRule::new("json", "a"));
    derive_descriptor(Leaf::descriptor(), &second).unwrap();
    assert_eq!(cache_len(), before + 4);
}
