//! Immutable, path-addressed structural updates with lookup paths.
//!
//! Given a composite root, a dotted path, and a replacement value or
//! transform, the updater produces a new root in which only the containers
//! along the path are replaced; every sibling subtree keeps its identity
//! (structural sharing, observable through [`Value::ptr_eq`]). A path
//! segment may also be a lookup predicate — `{id:2,type:bar}` — selecting a
//! sequence element by field equality instead of index.
//!
//! # Example
//!
//! ```
//! use update_path::{update, push, Value};
//! use serde_json::json;
//!
//! let root = Value::from(json!({
//!     "foo": {"bar": {"baz": [1, 2, 3]}},
//!     "bak": {"big": 1}
//! }));
//!
//! let out = update(&root, "foo.bar.baz.1", 4).unwrap();
//! assert_eq!(out.to_json().pointer("/foo/bar/baz").unwrap(), &json!([1, 4, 3]));
//! // Subtrees off the path are shared, not cloned.
//! assert!(out.get("bak").unwrap().ptr_eq(root.get("bak").unwrap()));
//!
//! // Lookup paths address sequence elements by field equality.
//! let root = Value::from(json!({"users": [{"id": 1, "karma": 0}, {"id": 2, "karma": 7}]}));
//! let out = update(&root, "users.{id:2}.karma", 8).unwrap();
//! assert_eq!(out.to_json().pointer("/users/1/karma").unwrap(), &json!(8));
//!
//! // Operations compose with the same traversal.
//! let out = push(&out, "users", Value::from(json!({"id": 3, "karma": 1}))).unwrap();
//! assert_eq!(out.get("users").unwrap().as_seq().unwrap().len(), 3);
//! ```
//!
//! Missing intermediate containers are created on the way down (a sequence
//! when the next segment is a numeric index, a mapping otherwise); see
//! [`deep_set`]. Unresolved lookups are governed by [`MissingLookup`],
//! injected per [`Updater`] instance.

pub mod batch;
pub mod error;
pub mod lookup;
pub mod ops;
pub mod path;
pub mod update;

pub use batch::{update_all, update_all_in, Batch, Entry, Helper};
pub use error::UpdateError;
pub use lookup::{resolve_index, Equality, Lookup};
pub use ops::{assign, del, pop, push, remove, shift, unshift};
pub use update::{
    update, update_in, update_in_with, update_with, LookupHook, MissingLookup, Updater,
};

pub use update_path_deep_set::deep_set;
pub use update_path_value::{Mapping, Value};
