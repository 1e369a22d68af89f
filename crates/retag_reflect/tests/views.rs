use retag_reflect::derive::Described;
use retag_reflect::retag::{Rule, convert};
use retag_reflect::rules::{SnakeRule, ViewRule};

#[derive(Described)]
pub struct UserProfile {
    pub id: i64,
    #[retag(view = "*", json = "name")]
    pub name: String,
    #[retag(view = "user", json = "card,omitempty")]
    pub card_number: String,
    #[retag(view = "support,admin", json = "note")]
    pub support_note: String,
    #[retag(view = "admin")]
    pub internal_score: u32,
}

fn profile() -> UserProfile {
    UserProfile {
        id: 7,
        name: "Duke Nukem".into(),
        card_number: "4378 0990 7823 1019".into(),
        support_note: "Strange customer".into(),
        internal_score: 3,
    }
}

fn to_json(profile: &UserProfile, rule: &Rule) -> String {
    serde_json::to_string(&convert(profile, rule).serialize_with("json")).unwrap()
}

#[test]
fn each_view_sees_its_fields() {
    let profile = profile();

    let user = Rule::new(ViewRule::new("json", "user"));
    assert_eq!(
        to_json(&profile, &user),
        r#"{"name":"Duke Nukem","card":"4378 0990 7823 1019"}"#
    );

    let support = Rule::new(ViewRule::new("json", "support"));
    assert_eq!(
        to_json(&profile, &support),
        r#"{"name":"Duke Nukem","note":"Strange customer"}"#
    );

    let admin = Rule::new(ViewRule::new("json", "admin"));
    assert_eq!(
        to_json(&profile, &admin),
        r#"{"name":"Duke Nukem","note":"Strange customer","internal_score":3}"#
    );

    let guest = Rule::new(ViewRule::new("json", "guest"));
    assert_eq!(to_json(&profile, &guest), r#"{"name":"Duke Nukem"}"#);
}

#[test]
fn omitempty_follows_the_view() {
    let mut profile = profile();
    profile.card_number.clear();

    let user = Rule::new(ViewRule::new("json", "user"));
    assert_eq!(to_json(&profile, &user), r#"{"name":"Duke Nukem"}"#);
}

#[test]
fn original_tags_are_untouched() {
    use retag_reflect::info::Described;

    let profile = profile();
    let user = Rule::new(ViewRule::new("json", "user"));
    let view = convert(&profile, &user);

    let original = UserProfile::descriptor().as_struct().unwrap();
    assert_eq!(original.field("id").unwrap().tag().as_str(), "");
    assert_eq!(
        original.field("card_number").unwrap().tag().as_str(),
        r#"view:"user" json:"card,omitempty""#
    );

    let derived = view.descriptor().as_struct().unwrap();
    assert_eq!(derived.field("id").unwrap().tag().as_str(), r#"json:"-""#);
    assert_eq!(
        derived.field("card_number").unwrap().tag().as_str(),
        r#"json:"card,omitempty""#
    );
    assert!(derived.ty().is::<UserProfile>());
    assert_eq!(derived.ty().layout(), original.ty().layout());
}

#[test]
fn views_read_the_original_memory() {
    let profile = profile();
    let admin = Rule::new(ViewRule::new("json", "admin"));
    let view = convert(&profile, &admin);

    assert_eq!(view.addr(), &profile as *const UserProfile as usize);
    let name = view.field("name").unwrap().get::<String>().unwrap();
    assert!(core::ptr::eq(name, &profile.name));
    assert_eq!(view.field("internal_score").unwrap().get::<u32>(), Some(&3));
}

#[derive(Described)]
#[allow(non_snake_case)]
pub struct LegacyRecord {
    #[retag(json = "_id")]
    pub RecordId: u64,
    pub DisplayName: String,
    pub createdAt: String,
}

#[test]
fn snake_rule_fills_missing_names() {
    let record = LegacyRecord {
        RecordId: 1,
        DisplayName: "Ada".into(),
        createdAt: "1815".into(),
    };

    let snake = Rule::new(SnakeRule::new("json"));
    let json = serde_json::to_string(&convert(&record, &snake).serialize_with("json")).unwrap();
    assert_eq!(
        json,
        r#"{"_id":1,"display_name":"Ada","created_at":"1815"}"#
    );
}

#[test]
fn other_formats_read_their_own_key() {
    let profile = profile();
    let user = Rule::new(ViewRule::new("ron", "user"));
    let view = convert(&profile, &user);

    let ron = ron::to_string(&view.serialize_with("ron")).unwrap();
    assert!(ron.contains("\"name\""));
    assert!(ron.contains("\"card_number\""));
    assert!(!ron.contains("support_note"));
}
