#![allow(dead_code)]
#![allow(unsafe_code)]

use core::any::Any;
use core::ptr;
use std::sync::mpsc::{self, Sender};

use retag_reflect::derive::Described;
use retag_reflect::info::{ArrayInfo, Described, OpaqueInfo, TypeDescriptor, TypeKind};
use retag_reflect::retag::{RetagError, Rule, convert, derive_descriptor, try_convert};
use retag_reflect::rules::ViewRule;

fn admin() -> Rule {
    Rule::new(ViewRule::new("json", "admin"))
}

#[derive(Described)]
pub struct Callback {
    #[retag(view = "admin")]
    pub name: String,
    pub on_change: fn(u32),
}

#[derive(Described)]
pub struct RawHandle {
    pub handle: Option<*const u8>,
}

#[test]
fn unsupported_public_fields_fail() {
    let err = derive_descriptor(Callback::descriptor(), &admin()).unwrap_err();
    assert!(matches!(
        err,
        RetagError::UnsupportedFieldKind {
            kind: TypeKind::Function,
            ..
        }
    ));

    let err = derive_descriptor(RawHandle::descriptor(), &admin()).unwrap_err();
    assert!(matches!(
        err,
        RetagError::UnsupportedFieldKind {
            kind: TypeKind::RawPointer,
            ..
        }
    ));
}

#[derive(Described)]
pub struct Notifier {
    #[retag(view = "admin")]
    pub tx: Sender<u8>,
}

#[derive(Described)]
pub struct Plugin {
    pub name: String,
    pub state: Box<dyn Any + Send>,
}

#[test]
fn channels_and_dynamic_values_fail() {
    let (tx, _rx) = mpsc::channel();
    let notifier = Notifier { tx };
    let err = try_convert(&notifier, &admin()).unwrap_err();
    assert!(matches!(
        err,
        RetagError::UnsupportedFieldKind {
            kind: TypeKind::Channel,
            ..
        }
    ));

    let plugin = Plugin {
        name: "cron".into(),
        state: Box::new(3_u8),
    };
    let err = try_convert(&plugin, &admin()).unwrap_err();
    match err {
        RetagError::UnsupportedFieldKind { type_path, kind } => {
            assert_eq!(kind, TypeKind::Dynamic);
            assert!(type_path.contains("Any"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[derive(Described)]
pub struct Hidden {
    pub name: String,
    on_change: fn(u32),
    counter: u64,
}

#[test]
fn private_fields_are_kept_but_unreachable() {
    let hidden = Hidden {
        name: "ada".into(),
        on_change: |_| {},
        counter: 9,
    };
    let _ = (hidden.on_change, hidden.counter);

    let view = try_convert(&hidden, &admin()).unwrap();
    let info = view.descriptor().as_struct().unwrap();

    assert_eq!(info.field_len(), 3);
    assert_eq!(info.field_at(1).unwrap().name(), "");
    assert!(ptr::eq(
        info.field_at(1).unwrap().descriptor(),
        <fn(u32)>::descriptor()
    ));
    assert!(ptr::eq(info.field_at(2).unwrap().descriptor(), u64::descriptor()));
    assert_eq!(info.field_at(1).unwrap().tag().as_str(), r#"json:"-""#);
    assert!(info.field("counter").is_none());

    assert!(view.field("counter").is_none());
    assert!(view.field_at(2).is_none());
    assert_eq!(view.fields().count(), 1);
    assert_eq!(
        serde_json::to_string(&view.serialize_with("json")).unwrap(),
        "{}"
    );
}

#[derive(Described)]
pub struct Item {
    #[retag(view = "admin")]
    pub sku: String,
}

#[derive(Described)]
pub struct Order {
    #[retag(view = "*")]
    pub id: u64,
    items: Vec<Item>,
}

#[test]
fn private_fields_keep_their_types() {
    let order = Order {
        id: 4,
        items: vec![Item { sku: "A-1".into() }],
    };
    assert_eq!(order.items.len(), 1);

    let view = try_convert(&order, &admin()).unwrap();
    let info = view.descriptor().as_struct().unwrap();
    let items = info.field_at(1).unwrap();

    assert!(ptr::eq(items.descriptor(), <Vec<Item>>::descriptor()));
    assert_eq!(items.name(), "");
    assert_eq!(items.tag().as_str(), r#"json:"-""#);
    assert_eq!(info.field("id").unwrap().tag().as_str(), "");
    assert_eq!(
        serde_json::to_string(&view.serialize_with("json")).unwrap(),
        r#"{"id":4}"#
    );
}

#[derive(Described)]
#[repr(align(16))]
pub struct Aligned {
    #[retag(view = "admin")]
    pub value: u8,
}

#[derive(Described)]
pub struct HoldsAligned {
    pub aligned: Aligned,
}

#[test]
fn layout_must_follow_from_fields() {
    let err = derive_descriptor(Aligned::descriptor(), &admin()).unwrap_err();
    match err {
        RetagError::LayoutInvariantViolation {
            original, derived, ..
        } => {
            assert_eq!(original.align(), 16);
            assert_eq!(derived.align(), 1);
        }
        other => panic!("unexpected error: {other}"),
    }

    // The failure propagates to every struct that contains the type.
    let err = derive_descriptor(HoldsAligned::descriptor(), &admin()).unwrap_err();
    assert!(matches!(err, RetagError::LayoutInvariantViolation { .. }));
}

#[test]
#[should_panic(expected = "cannot retag RawPointer type")]
fn convert_panics_on_failure() {
    let handle = RawHandle { handle: None };
    let _ = convert(&handle, &admin());
}

#[test]
fn failures_are_not_cached() {
    let rule = admin();
    for _ in 0..2 {
        assert!(derive_descriptor(Callback::descriptor(), &rule).is_err());
    }
}

pub struct Impostor {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

// SAFETY: not upheld on purpose, conversion has to refuse it.
unsafe impl Described for Impostor {
    fn descriptor() -> &'static TypeDescriptor {
        String::descriptor()
    }
}

#[test]
fn descriptors_of_other_types_are_refused() {
    let impostor = Impostor { a: 1, b: 2, c: 3 };
    match try_convert(&impostor, &admin()).unwrap_err() {
        RetagError::DescriptorMismatch {
            type_path,
            described,
        } => {
            assert!(type_path.ends_with("Impostor"));
            assert_eq!(described, String::descriptor().type_path());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
#[should_panic(expected = "serialize hook of")]
fn serialize_hook_must_match_the_type() {
    let _ = OpaqueInfo::new::<Impostor>().with_serialize::<String>();
}

#[test]
#[should_panic(expected = "default hook of")]
fn default_hook_must_match_the_type() {
    let _ = OpaqueInfo::new::<Impostor>().with_is_default::<u64>();
}

#[test]
#[should_panic(expected = "item descriptor of")]
fn array_items_must_match_the_type() {
    let _ = ArrayInfo::new::<u32, 4>(u16::descriptor());
}
