use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use serde_json::json;
use xmodel::{perform_microtask_checkpoint, Model, Store, Value};

type Calls = Rc<RefCell<Vec<(Option<Value>, Option<Value>)>>>;

fn record(store: &Store) -> Calls {
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    store.subscribe(move |old, new| sink.borrow_mut().push((old.cloned(), new.cloned())));
    calls
}

#[derive(Debug, Clone)]
enum Write {
    Set(String, i64),
    Remove(String),
}

fn write_strategy() -> impl Strategy<Value = Write> {
    let path = prop::sample::select(vec!["a", "b", "a.x", "b.0", "c.d.e"]).prop_map(String::from);
    prop_oneof![
        (path.clone(), any::<i64>()).prop_map(|(path, n)| Write::Set(path, n)),
        path.prop_map(Write::Remove),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn burst_of_writes_notifies_once(writes in prop::collection::vec(write_strategy(), 1..8)) {
        let store = Store::new();
        store.set("seed", json!(true)).unwrap_or_else(|e| panic!("seed failed: {e}"));
        perform_microtask_checkpoint();
        let calls = record(&store);
        let before = store.get_value();

        for write in &writes {
            let result = match write {
                Write::Set(path, n) => store.set(path.as_str(), json!(n)),
                Write::Remove(path) => store.remove(path.as_str()),
            };
            result.unwrap_or_else(|e| panic!("write failed: {e}"));
        }
        let after = store.get_value();
        let changed = match (&before, &after) {
            (Some(before), Some(after)) => !before.same(after),
            _ => true,
        };

        prop_assert_eq!(calls.borrow().len(), 1);
        perform_microtask_checkpoint();
        if changed {
            prop_assert_eq!(calls.borrow().len(), 2);
            let (old, new) = calls.borrow()[1].clone();
            prop_assert!(old.zip(before).is_some_and(|(old, before)| old.same(&before)));
            prop_assert!(new.zip(after).is_some_and(|(new, after)| new.same(&after)));
        } else {
            prop_assert_eq!(calls.borrow().len(), 1);
        }
    }

    #[test]
    fn committed_values_are_detached_from_input(n in any::<i64>()) {
        let model = Model::new();
        let mut draft = json!({"list": [n]});
        model.set_value(draft.clone());
        draft["list"][0] = json!("changed");
        prop_assert_eq!(model.get("list.0").unwrap_or_else(|e| panic!("get failed: {e}")), Some(Value::from(n)));
        perform_microtask_checkpoint();
    }
}

#[test]
fn three_sets_in_one_turn_produce_one_callback() {
    let store = Store::new();
    let calls = record(&store);
    store.set("a", json!(1)).unwrap();
    store.set("b", json!(2)).unwrap();
    store.set("c", json!(3)).unwrap();
    perform_microtask_checkpoint();
    assert_eq!(calls.borrow().len(), 2);
    assert_eq!(calls.borrow()[1], (None, Some(Value::from(json!({"a": 1, "b": 2, "c": 3})))));
}

#[test]
fn model_subscribe_sees_bursts_from_children() {
    let root = Model::new();
    let child = Model::new();
    root.attach_child("child", &child).unwrap();
    root.set("foo", json!("bar")).unwrap();
    perform_microtask_checkpoint();

    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    root.subscribe(move |old, new| sink.borrow_mut().push((old.cloned(), new.cloned())))
        .unwrap();
    root.delete("foo").unwrap();
    assert_eq!(calls.borrow().len(), 1);
    assert_eq!(calls.borrow()[0], (None, Some(Value::from(json!({"foo": "bar"})))));

    child.set("x", json!(1)).unwrap();
    child.set("y", json!(2)).unwrap();
    perform_microtask_checkpoint();
    assert_eq!(calls.borrow().len(), 2);
    assert_eq!(
        calls.borrow()[1],
        (
            Some(Value::from(json!({"foo": "bar"}))),
            Some(Value::from(json!({"child": {"x": 1, "y": 2}})))
        )
    );
}
