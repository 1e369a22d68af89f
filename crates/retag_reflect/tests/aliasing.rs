use retag_reflect::derive::Described;
use retag_reflect::retag::{Rule, convert_mut};
use retag_reflect::rules::ViewRule;

#[derive(Described, Debug, PartialEq)]
pub struct Counter {
    #[retag(view = "*")]
    pub hits: u64,
    #[retag(view = "*")]
    pub samples: Vec<u32>,
    #[retag(view = "*")]
    pub last: Option<Box<Sample>>,
}

#[derive(Described, Debug, PartialEq)]
pub struct Sample {
    #[retag(view = "*")]
    pub value: i32,
}

fn rule() -> Rule {
    Rule::new(ViewRule::new("json", "stats"))
}

#[test]
fn writes_land_in_the_original() {
    let mut counter = Counter {
        hits: 1,
        samples: vec![10, 20],
        last: Some(Box::new(Sample { value: -1 })),
    };

    {
        let mut view = convert_mut(&mut counter, &rule());
        *view.field_mut("hits").unwrap().get_mut::<u64>().unwrap() += 41;

        let mut samples = view.field_mut("samples").unwrap();
        *samples.item_mut(1).unwrap().get_mut::<u32>().unwrap() = 25;
        assert!(samples.item_mut(2).is_none());

        let mut last = view.field_mut("last").unwrap();
        let mut boxed = last.pointee_mut().unwrap();
        let mut sample = boxed.pointee_mut().unwrap();
        *sample.field_mut("value").unwrap().get_mut::<i32>().unwrap() = 7;
    }

    assert_eq!(
        counter,
        Counter {
            hits: 42,
            samples: vec![10, 25],
            last: Some(Box::new(Sample { value: 7 })),
        }
    );
}

#[test]
fn typed_access_checks_the_type() {
    let mut counter = Counter {
        hits: 0,
        samples: Vec::new(),
        last: None,
    };

    let view = convert_mut(&mut counter, &rule());
    let hits = view.into_field_mut("hits").unwrap();
    let hits = hits.into_mut::<u32>().unwrap_err();
    *hits.into_mut::<u64>().unwrap() = 3;

    assert_eq!(counter.hits, 3);
}

#[test]
fn shared_and_mutable_views_agree() {
    let mut counter = Counter {
        hits: 5,
        samples: vec![1],
        last: None,
    };
    let addr = &counter as *const Counter as usize;

    let mut view = convert_mut(&mut counter, &rule());
    assert_eq!(view.addr(), addr);
    assert!(view.field_mut("last").unwrap().pointee_mut().is_none());

    let json = serde_json::to_string(&view.serialize_with("json")).unwrap();
    assert_eq!(json, r#"{"hits":5,"samples":[1],"last":null}"#);

    let shared = view.into_ref();
    assert_eq!(shared.field("hits").unwrap().get::<u64>(), Some(&5));
}
