//! Deferred operations and batch application.
//!
//! A [`Helper`] is the data form of an operation: the operation kind plus
//! its bound arguments, waiting for a root and a path. Helpers are the
//! right-hand side of [`Batch`] entries, so one call can mix plain terminal
//! sets with deferred operations:
//!
//! ```
//! use update_path::{update_all, Batch, Helper, Value};
//! use serde_json::json;
//!
//! let root = Value::from(json!({"foo": {"bar": false, "baz": [1, 2]}}));
//! let batch = Batch::new()
//!     .set("foo.bar", true)
//!     .op("foo.baz", Helper::push(3));
//! let out = update_all(&root, &batch).unwrap();
//! assert_eq!(out.to_json(), json!({"foo": {"bar": true, "baz": [1, 2, 3]}}));
//! ```

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use update_path_value::Value;

use crate::error::UpdateError;
use crate::update::Updater;

/// A deferred operation: kind plus bound arguments, applied at batch time
/// against the batch entry's path.
#[derive(Clone)]
pub enum Helper {
    With(Rc<dyn Fn(Option<Value>) -> Value>),
    Push(Value),
    Unshift(Value),
    Pop,
    Shift,
    Assign(Value),
    Del,
    Remove,
}

impl Helper {
    /// Defer an arbitrary transform of the value at the entry's path.
    pub fn with<F>(transform: F) -> Helper
    where
        F: Fn(Option<Value>) -> Value + 'static,
    {
        Helper::With(Rc::new(transform))
    }

    /// Defer appending `item` at the sequence tail.
    pub fn push(item: impl Into<Value>) -> Helper {
        Helper::Push(item.into())
    }

    /// Defer inserting `item` at the sequence head.
    pub fn unshift(item: impl Into<Value>) -> Helper {
        Helper::Unshift(item.into())
    }

    /// Defer dropping the last sequence element.
    pub fn pop() -> Helper {
        Helper::Pop
    }

    /// Defer dropping the first sequence element.
    pub fn shift() -> Helper {
        Helper::Shift
    }

    /// Defer a shallow merge of `fields` into the mapping at the path.
    pub fn assign(fields: impl Into<Value>) -> Helper {
        Helper::Assign(fields.into())
    }

    /// Defer deleting the key named by the path's last segment.
    pub fn del() -> Helper {
        Helper::Del
    }

    /// Defer removing the sequence element addressed by the path's last
    /// segment (index or lookup predicate).
    pub fn remove() -> Helper {
        Helper::Remove
    }
}

impl fmt::Debug for Helper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Helper::With(_) => f.write_str("With(..)"),
            Helper::Push(item) => f.debug_tuple("Push").field(item).finish(),
            Helper::Unshift(item) => f.debug_tuple("Unshift").field(item).finish(),
            Helper::Pop => f.write_str("Pop"),
            Helper::Shift => f.write_str("Shift"),
            Helper::Assign(fields) => f.debug_tuple("Assign").field(fields).finish(),
            Helper::Del => f.write_str("Del"),
            Helper::Remove => f.write_str("Remove"),
        }
    }
}

/// One batch entry: a plain terminal value or a deferred operation.
#[derive(Debug, Clone)]
pub enum Entry {
    Value(Value),
    Op(Helper),
}

/// An insertion-ordered mapping of path → entry, applied sequentially
/// against a single root.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    entries: IndexMap<String, Entry>,
}

impl Batch {
    pub fn new() -> Batch {
        Batch::default()
    }

    /// Add a plain terminal set at `path`. A later entry for the same path
    /// replaces the earlier one.
    pub fn set(mut self, path: impl Into<String>, value: impl Into<Value>) -> Batch {
        self.entries.insert(path.into(), Entry::Value(value.into()));
        self
    }

    /// Add a deferred operation at `path`.
    pub fn op(mut self, path: impl Into<String>, helper: Helper) -> Batch {
        self.entries.insert(path.into(), Entry::Op(helper));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(path, entry)| (path.as_str(), entry))
    }
}

impl Updater {
    /// Apply every batch entry against a copy of `root`, in insertion
    /// order, and return the new root.
    ///
    /// Entries whose paths share a prefix each re-copy the shared ancestor;
    /// later entries operate on the already-updated root, so no edit is
    /// lost. A failing entry propagates its error and leaves earlier
    /// entries applied (no rollback).
    pub fn update_all(&self, root: &Value, batch: &Batch) -> Result<Value, UpdateError> {
        let mut out = root.clone();
        self.update_all_in(&mut out, batch)?;
        Ok(out)
    }

    /// [`Updater::update_all`] editing `root` in place.
    pub fn update_all_in(&self, root: &mut Value, batch: &Batch) -> Result<(), UpdateError> {
        for (path, entry) in batch.iter() {
            match entry {
                Entry::Value(value) => {
                    self.apply(root, path, &mut |_| Ok(value.clone()))?;
                }
                Entry::Op(helper) => self.apply_helper(root, path, helper)?,
            }
        }
        Ok(())
    }

    fn apply_helper(&self, root: &mut Value, path: &str, helper: &Helper) -> Result<(), UpdateError> {
        match helper {
            Helper::With(transform) => self.apply(root, path, &mut |old| Ok(transform(old))),
            Helper::Push(item) => self.push_in(root, path, item.clone()),
            Helper::Unshift(item) => self.unshift_in(root, path, item.clone()),
            Helper::Pop => self.pop_in(root, path),
            Helper::Shift => self.shift_in(root, path),
            Helper::Assign(fields) => self.assign_in(root, path, fields.clone()),
            Helper::Del => self.del_in(root, path),
            Helper::Remove => self.remove_in(root, path),
        }
    }
}

/// [`Updater::update_all`] with the default configuration.
pub fn update_all(root: &Value, batch: &Batch) -> Result<Value, UpdateError> {
    Updater::new().update_all(root, batch)
}

/// [`Updater::update_all_in`] with the default configuration.
pub fn update_all_in(root: &mut Value, batch: &Batch) -> Result<(), UpdateError> {
    Updater::new().update_all_in(root, batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn val(v: serde_json::Value) -> Value {
        Value::from(v)
    }

    #[test]
    fn test_plain_values_are_terminal_sets() {
        let root = val(json!({"foo": {"bar": "baz"}, "baz": [{"bak": "foo"}]}));
        let batch = Batch::new()
            .set("foo.bar", "baz2")
            .set("baz.0.bak", "foo2");
        let out = update_all(&root, &batch).unwrap();
        assert_eq!(
            out.to_json(),
            json!({"foo": {"bar": "baz2"}, "baz": [{"bak": "foo2"}]})
        );
    }

    #[test]
    fn test_with_helper_transforms_old_value() {
        let root = val(json!({"foo": {"bar": false, "baz": [1, 2]}}));
        let batch = Batch::new().set("foo.bar", true).op(
            "foo.baz",
            Helper::with(|old| match old {
                Some(Value::Seq(items)) => items
                    .iter()
                    .map(|v| match v {
                        Value::Num(n) => Value::Num(n * 2.0),
                        other => other.clone(),
                    })
                    .collect(),
                _ => Value::Null,
            }),
        );
        let out = update_all(&root, &batch).unwrap();
        assert_eq!(out.to_json(), json!({"foo": {"bar": true, "baz": [2, 4]}}));
    }

    #[test]
    fn test_assign_helper_with_lookup_path() {
        let root = val(json!({"foo": {"bar": false, "baz": [{"a": "a1"}, {"a": "a2"}]}}));
        let batch = Batch::new()
            .set("foo.bar", true)
            .op("foo.baz.{a:a2}", Helper::assign(val(json!({"b": "b2"}))));
        let out = update_all(&root, &batch).unwrap();
        assert_eq!(
            out.to_json(),
            json!({"foo": {"bar": true, "baz": [{"a": "a1"}, {"a": "a2", "b": "b2"}]}})
        );
    }

    #[test]
    fn test_remove_helper_with_lookup_path() {
        let root = val(json!({"foo": {"bar": false, "baz": [{"a": "a1"}, {"a": "a2"}, {"a": "a3"}]}}));
        let batch = Batch::new()
            .set("foo.bar", true)
            .op("foo.baz.{a:a2}", Helper::remove());
        let out = update_all(&root, &batch).unwrap();
        assert_eq!(
            out.to_json(),
            json!({"foo": {"bar": true, "baz": [{"a": "a1"}, {"a": "a3"}]}})
        );
    }

    #[test]
    fn test_entries_apply_in_insertion_order() {
        let root = val(json!({"n": []}));
        let batch = Batch::new().op("n", Helper::push(1)).set("n", val(json!([9])));
        // The later `set` replaces the earlier entry for the same path.
        assert_eq!(batch.len(), 1);
        let out = update_all(&root, &batch).unwrap();
        assert_eq!(out.to_json(), json!({"n": [9]}));

        let batch = Batch::new()
            .op("n", Helper::push(1))
            .op("m", Helper::push(2));
        let root = val(json!({"n": [], "m": []}));
        let out = update_all(&root, &batch).unwrap();
        assert_eq!(out.to_json(), json!({"n": [1], "m": [2]}));
    }

    #[test]
    fn test_prefix_sharing_entries_both_apply() {
        let root = val(json!({"foo": {"a": 1, "b": 2}}));
        let batch = Batch::new().set("foo.a", 10).set("foo.b", 20);
        let out = update_all(&root, &batch).unwrap();
        assert_eq!(out.to_json(), json!({"foo": {"a": 10, "b": 20}}));
    }

    #[test]
    fn test_failing_entry_keeps_earlier_entries_applied() {
        let mut root = val(json!({"a": 1, "items": {"not": "a sequence"}}));
        let batch = Batch::new().set("a", 2).op("items", Helper::pop());
        let err = update_all_in(&mut root, &batch).unwrap_err();
        assert_eq!(err, UpdateError::NotASequence);
        assert_eq!(root.get("a"), Some(&Value::Num(2.0)));
    }

    #[test]
    fn test_update_all_is_copy_root() {
        let root = val(json!({"foo": {"bar": 1}, "bak": {"big": 1}}));
        let out = update_all(&root, &Batch::new().set("foo.bar", 2)).unwrap();
        assert!(!out.ptr_eq(&root));
        assert!(out.get("bak").unwrap().ptr_eq(root.get("bak").unwrap()));
        assert_eq!(root.to_json(), json!({"foo": {"bar": 1}, "bak": {"big": 1}}));
    }

    #[test]
    fn test_every_helper_kind_applies() {
        let root = val(json!({
            "s": [1, 2, 3],
            "m": {"a": 1, "b": 2},
            "list": [{"id": 1}, {"id": 2}]
        }));
        let batch = Batch::new()
            .op("s", Helper::unshift(0))
            .op("m", Helper::assign(val(json!({"c": 3}))))
            .op("m.b", Helper::del())
            .op("list.{id:1}", Helper::remove());
        let out = update_all(&root, &batch).unwrap();
        assert_eq!(
            out.to_json(),
            json!({
                "s": [0, 1, 2, 3],
                "m": {"a": 1, "c": 3},
                "list": [{"id": 2}]
            })
        );
    }
}
