use retag_reflect::derive::Described;
use retag_reflect::info::{Described, TypeKind, Visibility};
use retag_reflect::retag::{Rule, convert, derive_descriptor};
use retag_reflect::rules::{SnakeRule, ViewRule};

#[derive(Described, serde::Serialize, Default, PartialEq)]
#[retag(opaque, serialize, default)]
pub struct Cents(i64);

#[derive(Described, serde::Serialize)]
#[retag(opaque, serialize)]
pub enum Status {
    Active,
    Closed { reason: String },
}

#[derive(Described)]
#[retag(opaque)]
pub struct Secret(String);

#[derive(Described)]
pub struct Invoice {
    #[retag(json = "total,omitempty")]
    pub total: Cents,
    #[retag(json = "status")]
    pub status: Status,
    #[retag(json = "-")]
    pub secret: Secret,
}

fn keep_tags() -> Rule {
    Rule::new(|owner: &retag_reflect::info::StructInfo, index: usize| {
        owner.field_at(index).map(|f| f.tag().clone()).unwrap_or_default()
    })
}

#[test]
fn opaque_types_use_their_own_serialize() {
    let invoice = Invoice {
        total: Cents(250),
        status: Status::Closed {
            reason: "paid".into(),
        },
        secret: Secret("hunter2".into()),
    };
    assert_eq!(invoice.secret.0, "hunter2");

    let json = serde_json::to_string(&convert(&invoice, &keep_tags()).serialize_with("json")).unwrap();
    assert_eq!(json, r#"{"total":250,"status":{"Closed":{"reason":"paid"}}}"#);

    let empty = Invoice {
        total: Cents(0),
        status: Status::Active,
        secret: Secret(String::new()),
    };
    let json = serde_json::to_string(&convert(&empty, &keep_tags()).serialize_with("json")).unwrap();
    assert_eq!(json, r#"{"status":"Active"}"#);
}

#[test]
fn opaque_without_serialize_fails_to_serialize() {
    let secret = Secret("x".into());
    let view = convert(&secret, &keep_tags());
    assert_eq!(view.kind(), TypeKind::Opaque);
    let err = serde_json::to_string(&view.serialize_with("json")).unwrap_err();
    assert!(err.to_string().contains("has no serialize hook"));
}

#[derive(Described, serde::Serialize)]
#[retag(serialize)]
pub struct Point {
    #[retag(json = "-")]
    pub x: i32,
    pub y: i32,
}

#[test]
fn struct_serialize_flag_bypasses_tags() {
    let point = Point { x: 1, y: 2 };
    let json = serde_json::to_string(&convert(&point, &keep_tags()).serialize_with("json")).unwrap();
    assert_eq!(json, r#"{"x":1,"y":2}"#);
}

#[derive(Described)]
pub struct Page<T, const N: usize> {
    #[retag(view = "*")]
    pub items: [T; N],
    #[retag(view = "*")]
    pub total: usize,
}

#[derive(Described)]
pub struct Item {
    #[retag(view = "*", json = "label")]
    pub label: String,
    #[retag(view = "admin", json = "cost")]
    pub cost: u32,
}

#[test]
fn generic_types_get_one_descriptor_per_instance() {
    let a = Page::<Item, 1>::descriptor();
    let b = Page::<Item, 2>::descriptor();
    let c = Page::<u8, 1>::descriptor();
    assert!(!std::ptr::eq(a, b));
    assert!(!std::ptr::eq(a, c));
    assert!(std::ptr::eq(a, Page::<Item, 1>::descriptor()));

    let page = Page {
        items: [Item {
            label: "pen".into(),
            cost: 2,
        }],
        total: 1,
    };
    let public = Rule::new(ViewRule::new("json", "public"));
    let json = serde_json::to_string(&convert(&page, &public).serialize_with("json")).unwrap();
    assert_eq!(json, r#"{"items":[{"label":"pen"}],"total":1}"#);
}

#[derive(Described)]
pub struct Marker;

#[derive(Described)]
pub struct Visibilities {
    pub open: u8,
    pub(crate) krate: u8,
    #[retag(tag = r#"x-db:"pk""#, json = "r")]
    pub r#ref: u8,
    closed: u8,
}

#[test]
fn struct_shapes() {
    let marker = Marker::descriptor();
    assert_eq!(marker.as_struct().unwrap().field_len(), 0);
    let snake = Rule::new(SnakeRule::new("json"));
    assert!(std::ptr::eq(derive_descriptor(marker, &snake).unwrap(), marker));

    let info = Visibilities::descriptor().as_struct().unwrap();
    let visibility = info.iter().map(|f| f.visibility()).collect::<Vec<_>>();
    assert_eq!(
        visibility,
        [
            Visibility::Public,
            Visibility::Private,
            Visibility::Public,
            Visibility::Private
        ]
    );
    let field = info.field("ref").unwrap();
    assert_eq!(field.tag().as_str(), r#"x-db:"pk" json:"r""#);
    assert_eq!(field.tag().get("x-db"), "pk");

    let value = Visibilities {
        open: 1,
        krate: 2,
        r#ref: 3,
        closed: 4,
    };
    assert_eq!(value.krate + value.closed, 6);
    let json = serde_json::to_string(&convert(&value, &snake).serialize_with("json")).unwrap();
    assert_eq!(json, r#"{"open":1,"r":3}"#);
}
