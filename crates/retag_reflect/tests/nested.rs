use std::collections::BTreeMap;

use retag_reflect::derive::Described;
use retag_reflect::info::{Described, TypeKind};
use retag_reflect::retag::{Rule, convert, derive_descriptor};
use retag_reflect::rules::ViewRule;

#[derive(Described)]
pub struct Address {
    #[retag(view = "*", json = "city")]
    pub city: String,
    #[retag(view = "admin", json = "street")]
    pub street: String,
}

#[derive(Described)]
pub struct Customer {
    #[retag(view = "*", json = "name")]
    pub name: String,
    #[retag(view = "*", json = "home")]
    pub home: Address,
    #[retag(view = "*", json = "work,omitempty")]
    pub work: Option<Box<Address>>,
    #[retag(view = "*", json = "recent")]
    pub recent: [Address; 2],
    #[retag(view = "*", json = "history")]
    pub history: Vec<Address>,
    #[retag(view = "*", json = "by_label")]
    pub by_label: BTreeMap<String, Address>,
}

fn address(city: &str) -> Address {
    Address {
        city: city.into(),
        street: format!("{city} street"),
    }
}

fn customer() -> Customer {
    Customer {
        name: "Ada".into(),
        home: address("London"),
        work: None,
        recent: [address("Paris"), address("Rome")],
        history: vec![address("Oslo")],
        by_label: BTreeMap::from([("b".to_owned(), address("Bern")), ("a".to_owned(), address("Athens"))]),
    }
}

#[test]
fn nested_structs_take_the_view_everywhere() {
    let customer = customer();
    let public = Rule::new(ViewRule::new("json", "public"));
    let json = serde_json::to_string(&convert(&customer, &public).serialize_with("json")).unwrap();

    assert_eq!(
        json,
        concat!(
            r#"{"name":"Ada","home":{"city":"London"},"#,
            r#""recent":[{"city":"Paris"},{"city":"Rome"}],"#,
            r#""history":[{"city":"Oslo"}],"#,
            r#""by_label":{"a":{"city":"Athens"},"b":{"city":"Bern"}}}"#,
        )
    );
}

#[test]
fn pointers_follow_the_pointee() {
    let mut customer = customer();
    customer.work = Some(Box::new(address("Berlin")));

    let admin = Rule::new(ViewRule::new("json", "admin"));
    let view = convert(&customer, &admin);

    let work = view.field("work").unwrap();
    assert_eq!(work.kind(), TypeKind::Pointer);
    let boxed = work.pointee().unwrap();
    let address = boxed.pointee().unwrap();
    assert_eq!(address.kind(), TypeKind::Struct);
    assert_eq!(
        serde_json::to_string(&address.serialize_with("json")).unwrap(),
        r#"{"city":"Berlin","street":"Berlin street"}"#
    );
}

#[test]
fn wrappers_are_rebuilt_around_derived_items() {
    let admin = Rule::new(ViewRule::new("json", "admin"));
    let derived = derive_descriptor(Customer::descriptor(), &admin).unwrap();
    let derived_address = derive_descriptor(Address::descriptor(), &admin).unwrap();

    let info = derived.as_struct().unwrap();
    let history = info.field("history").unwrap().descriptor().as_list().unwrap();
    assert!(std::ptr::eq(history.item(), derived_address));
    assert!(!std::ptr::eq(
        info.field("history").unwrap().descriptor(),
        Vec::<Address>::descriptor()
    ));

    let recent = info.field("recent").unwrap().descriptor().as_array().unwrap();
    assert!(std::ptr::eq(recent.item(), derived_address));
    assert_eq!(recent.capacity(), 2);

    let by_label = info.field("by_label").unwrap().descriptor().as_map().unwrap();
    assert!(std::ptr::eq(by_label.key(), String::descriptor()));
    assert!(std::ptr::eq(by_label.value(), derived_address));
}

#[test]
fn containers_without_structs_are_shared() {
    let admin = Rule::new(ViewRule::new("json", "admin"));
    let original = Vec::<Option<u32>>::descriptor();
    assert!(std::ptr::eq(derive_descriptor(original, &admin).unwrap(), original));
    assert!(std::ptr::eq(
        derive_descriptor(String::descriptor(), &admin).unwrap(),
        String::descriptor()
    ));
}

#[test]
fn items_and_entries_are_reachable() {
    let customer = customer();
    let admin = Rule::new(ViewRule::new("json", "admin"));
    let view = convert(&customer, &admin);

    let history = view.field("history").unwrap();
    assert_eq!(history.len(), Some(1));
    let oslo = history.item(0).unwrap().field("city").unwrap();
    assert_eq!(oslo.get::<String>().map(String::as_str), Some("Oslo"));
    assert!(history.item(1).is_none());

    let cities = view
        .field("recent")
        .unwrap()
        .items()
        .map(|item| item.field("city").unwrap().get::<String>().unwrap().clone())
        .collect::<Vec<_>>();
    assert_eq!(cities, ["Paris", "Rome"]);

    let labels = view
        .field("by_label")
        .unwrap()
        .entries()
        .map(|(key, _)| key.get::<String>().unwrap().clone())
        .collect::<Vec<_>>();
    assert_eq!(labels, ["a", "b"]);
}
