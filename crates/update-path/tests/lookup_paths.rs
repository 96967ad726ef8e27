//! Lookup-path traversal: predicate resolution, policies, and errors.

use std::cell::Cell;
use std::rc::Rc;

use serde_json::json;
use update_path::{update, Equality, MissingLookup, UpdateError, Updater, Value};

fn val(v: serde_json::Value) -> Value {
    Value::from(v)
}

#[test]
fn terminal_lookup_replaces_the_matched_element() {
    let root = val(json!({"foo": {"bar": [{"id": 1, "baz": 2}, {"id": 2, "baz": 3}]}}));
    let out = update(&root, "foo.bar.{id:2}", 5).unwrap();

    let bar = out.get("foo").unwrap().get("bar").unwrap();
    assert_eq!(bar.at(1), Some(&Value::Num(5.0)));
    assert!(!bar.ptr_eq(root.get("foo").unwrap().get("bar").unwrap()));
}

#[test]
fn multi_term_lookup_requires_all_terms() {
    let root = val(json!({"foo": {"bar": [
        {"id": 1, "baz": 2, "type": "foo"},
        {"id": 2, "baz": 3, "type": "foo"},
        {"id": 2, "baz": 4, "type": "bar"}
    ]}}));
    let out = update(&root, "foo.bar.{id:2,type:bar}", 5).unwrap();

    let bar = out.get("foo").unwrap().get("bar").unwrap();
    let old_bar = root.get("foo").unwrap().get("bar").unwrap();
    assert_eq!(bar.at(2), Some(&Value::Num(5.0)));
    assert!(bar.at(0).unwrap().ptr_eq(old_bar.at(0).unwrap()));
    assert!(bar.at(1).unwrap().ptr_eq(old_bar.at(1).unwrap()));
}

#[test]
fn mid_path_lookup_descends_into_the_matched_element() {
    let root = val(json!({"foo": {"bar": [{"id": 1, "baz": 2}, {"id": 2, "baz": 3}]}}));
    let out = update(&root, "foo.bar.{id:2}.baz", 5).unwrap();

    let bar = out.get("foo").unwrap().get("bar").unwrap();
    let old_bar = root.get("foo").unwrap().get("bar").unwrap();
    assert_eq!(bar.at(1).unwrap().get("baz"), Some(&Value::Num(5.0)));
    assert!(bar.at(0).unwrap().ptr_eq(old_bar.at(0).unwrap()));
    assert!(!bar.at(1).unwrap().ptr_eq(old_bar.at(1).unwrap()));
}

#[test]
fn lookup_tolerates_null_elements() {
    let root = val(json!({"foo": {"bar": [{"a": "a1"}, null, {"a": "a2"}]}}));
    let out = update(&root, "foo.bar.{a:a2}.a", "a3").unwrap();
    assert_eq!(
        out.get("foo").unwrap().get("bar").unwrap().to_json(),
        json!([{"a": "a1"}, null, {"a": "a3"}])
    );
}

#[test]
fn lookup_keys_and_values_may_contain_dashes() {
    let root = val(json!({"foo": {"bar": [
        {"item-name": "item-1", "baz": 2},
        {"item-name": "item-2", "baz": 3}
    ]}}));
    let out = update(&root, "foo.bar.{item-name:item-2}.baz", 5).unwrap();
    assert_eq!(
        out.to_json().pointer("/foo/bar/1/baz").unwrap(),
        &json!(5)
    );
}

#[test]
fn lookup_on_non_sequence_is_fatal() {
    let root = val(json!({"foo": {"bar": {"baz": 1}}}));
    assert_eq!(
        update(&root, "foo.bar.{baz:1}", 2).unwrap_err(),
        UpdateError::LookupOnNonSequence
    );
}

#[test]
fn autocreate_with_lookup_is_fatal() {
    let root = val(json!({}));
    assert_eq!(
        update(&root, "foo.bar.{id:1}", 2).unwrap_err(),
        UpdateError::AutocreateWithLookup
    );
}

#[test]
fn unresolved_lookup_errors_by_default() {
    let root = val(json!({"foo": {"bar": [{"id": 1, "baz": 2}]}}));
    assert_eq!(
        update(&root, "foo.bar.{id:2}.baz", 3).unwrap_err(),
        UpdateError::LookupNotFound("{id:2}".to_string())
    );
}

#[test]
fn skip_policies_leave_the_structure_unchanged() {
    let root = val(json!({"foo": {"bar": [{"id": 1, "baz": 2}]}}));

    for policy in [MissingLookup::SilentSkip, MissingLookup::WarnSkip] {
        let updater = Updater::new().with_missing_lookup(policy);
        let out = updater.update(&root, "foo.bar.{id:2}.baz", 3).unwrap();
        assert_eq!(out.to_json(), root.to_json());
    }
}

#[test]
fn custom_policy_sees_the_scanned_sequence() {
    let root = val(json!({"foo": {"bar": [{"id": 1}]}}));
    let called = Rc::new(Cell::new(false));
    let witness = called.clone();

    let updater = Updater::new().with_missing_lookup(MissingLookup::Custom(Rc::new(
        move |items, lookup| {
            witness.set(true);
            assert_eq!(items.len(), 1);
            assert_eq!(lookup.raw(), "{id:2}");
            Ok(())
        },
    )));

    let out = updater.update(&root, "foo.bar.{id:2}.baz", 3).unwrap();
    assert_eq!(out.to_json(), root.to_json());
    assert!(called.get());
}

#[test]
fn coercive_equality_matches_numeric_fields_and_strict_does_not() {
    let root = val(json!({"items": [{"id": 2, "v": 0}]}));

    let out = update(&root, "items.{id:2}.v", 1).unwrap();
    assert_eq!(out.to_json().pointer("/items/0/v").unwrap(), &json!(1));

    let strict = Updater::new().with_equality(Equality::Strict);
    assert_eq!(
        strict.update(&root, "items.{id:2}.v", 1).unwrap_err(),
        UpdateError::LookupNotFound("{id:2}".to_string())
    );
}
