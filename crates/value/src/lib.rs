//! Composite value type with `Rc`-based structural sharing.
//!
//! [`Value`] models arbitrarily nested data: mappings (string-keyed,
//! insertion-ordered), sequences (0-based), and scalar leaves. Both composite
//! variants keep their storage behind an [`Rc`], so cloning a `Value` shares
//! every subtree. Mutation goes through [`Rc::make_mut`], which shallow-copies
//! a container only when it is actually shared — the copy-on-write discipline
//! the updater crates build on.
//!
//! # Example
//!
//! ```
//! use update_path_value::Value;
//! use serde_json::json;
//!
//! let a = Value::from(json!({"foo": [1, 2, 3]}));
//! let b = a.clone();
//!
//! // Clones share composite subtrees by reference.
//! assert!(a.get("foo").unwrap().ptr_eq(b.get("foo").unwrap()));
//! assert_eq!(b.to_json(), json!({"foo": [1, 2, 3]}));
//! ```

use std::rc::Rc;

use indexmap::IndexMap;

/// An insertion-ordered string-keyed mapping.
pub type Mapping = IndexMap<String, Value>;

/// A nested composite value: mapping, sequence, or scalar leaf.
///
/// `Clone` is cheap: composites bump an `Rc` count and share their subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    Seq(Rc<Vec<Value>>),
    Map(Rc<Mapping>),
}

impl Value {
    /// Build a sequence value from elements.
    pub fn seq(items: Vec<Value>) -> Value {
        Value::Seq(Rc::new(items))
    }

    /// Build a mapping value from entries.
    pub fn map(entries: Mapping) -> Value {
        Value::Map(Rc::new(entries))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_seq(&self) -> bool {
        matches!(self, Value::Seq(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Elements of a sequence value.
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Entries of a mapping value.
    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Mutable access to a sequence, copying it first if shared.
    pub fn seq_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Seq(items) => Some(Rc::make_mut(items)),
            _ => None,
        }
    }

    /// Mutable access to a mapping, copying it first if shared.
    pub fn map_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Value::Map(entries) => Some(Rc::make_mut(entries)),
            _ => None,
        }
    }

    /// Look up a mapping entry by key, or a sequence element when `key`
    /// parses as an index.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.get(key),
            Value::Seq(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// Sequence element by index.
    pub fn at(&self, index: usize) -> Option<&Value> {
        self.as_seq().and_then(|items| items.get(index))
    }

    /// True when both values are composites backed by the same allocation.
    ///
    /// Scalars always compare `false`; use `==` for value equality.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Seq(a), Value::Seq(b)) => Rc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Fresh top-level container sharing all children, as in the classic
    /// spread/concat copy. Scalars are returned as-is.
    pub fn shallow_copy(&self) -> Value {
        match self {
            Value::Seq(items) => Value::seq(items.as_ref().clone()),
            Value::Map(entries) => Value::map(entries.as_ref().clone()),
            other => other.clone(),
        }
    }

    /// Convert to a `serde_json::Value`. Integral floats render as JSON
    /// integers; non-finite numbers degrade to null.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Num(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < i64::MAX as f64 {
                    serde_json::Value::from(*n as i64)
                } else {
                    serde_json::Number::from_f64(*n)
                        .map(serde_json::Value::Number)
                        .unwrap_or(serde_json::Value::Null)
                }
            }
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Seq(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

/// True for a plain non-negative decimal index without leading zeros.
pub fn is_index(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_digit())
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Value {
        Value::Num(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Value {
        Value::Num(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Value {
        Value::Num(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Value {
        Value::seq(items)
    }
}

impl From<Mapping> for Value {
    fn from(entries: Mapping) -> Value {
        Value::map(entries)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Value {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Num(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::seq(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(v: &Value) -> serde_json::Value {
        v.to_json()
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Value {
        Value::seq(iter.into_iter().collect())
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Value {
        Value::map(iter.into_iter().collect())
    }
}
