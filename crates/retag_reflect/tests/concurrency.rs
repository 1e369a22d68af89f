use std::sync::{Barrier, LazyLock};
use std::thread;

use retag_reflect::derive::Described;
use retag_reflect::info::Described;
use retag_reflect::retag::{Rule, convert, derive_descriptor};
use retag_reflect::rules::ViewRule;

#[derive(Described)]
pub struct Order {
    #[retag(view = "*", json = "id")]
    pub id: u64,
    #[retag(view = "*", json = "lines")]
    pub lines: Vec<Line>,
}

#[derive(Described)]
pub struct Line {
    #[retag(view = "*", json = "sku")]
    pub sku: String,
    #[retag(view = "warehouse", json = "bin")]
    pub bin: u16,
}

static PUBLIC: LazyLock<Rule> = LazyLock::new(|| Rule::new(ViewRule::new("json", "public")));

const THREADS: usize = 8;

#[test]
fn threads_share_one_descriptor() {
    let barrier = Barrier::new(THREADS);

    let addrs = thread::scope(|scope| {
        let handles = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    let derived = derive_descriptor(Order::descriptor(), &PUBLIC).unwrap();
                    core::ptr::from_ref(derived).addr()
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>()
    });

    assert!(addrs.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn threads_serialize_their_own_values() {
    thread::scope(|scope| {
        for id in 0..THREADS as u64 {
            scope.spawn(move || {
                let order = Order {
                    id,
                    lines: vec![Line {
                        sku: format!("sku-{id}"),
                        bin: 3,
                    }],
                };
                let json =
                    serde_json::to_string(&convert(&order, &PUBLIC).serialize_with("json")).unwrap();
                assert_eq!(json, format!(r#"{{"id":{id},"lines":[{{"sku":"sku-{id}"}}]}}"#));
            });
        }
    });
}
