//! Autocreating deep setter.
//!
//! [`deep_set`] walks `path` inside `root`, materializing every missing
//! intermediate container on the way, and places `value` at the deepest
//! point. A missing container becomes a sequence when the segment addressing
//! it is a plain non-negative integer index, a mapping otherwise. Sequences
//! are padded with `Null` up to the addressed index.
//!
//! # Example
//!
//! ```
//! use update_path_deep_set::deep_set;
//! use update_path_value::Value;
//! use serde_json::json;
//!
//! let mut root = Value::from(json!({}));
//! deep_set(&mut root, &["foo", "bar", "1"], Value::from(4));
//! assert_eq!(root.to_json(), json!({"foo": {"bar": [null, 4]}}));
//! ```

use update_path_value::{is_index, Mapping, Value};

/// Set `value` at `path` inside `root`, creating missing containers.
///
/// The walk never fails:
/// - an existing mapping is descended by string key, even for numeric text;
/// - an existing sequence addressed by an integer index is padded with
///   `Null` up to that index;
/// - any other node (scalar, null, or a container of the wrong shape for the
///   segment) is replaced by a fresh sequence or mapping as dictated by the
///   segment.
///
/// An empty `path` replaces `root` with `value`.
pub fn deep_set(root: &mut Value, path: &[&str], value: Value) {
    let Some((segment, rest)) = path.split_first() else {
        *root = value;
        return;
    };

    if is_index(segment) {
        // Numeric text addressing an existing mapping still means a string
        // key; the sequence interpretation applies everywhere else.
        if let Value::Map(_) = root {
            descend_map(root, segment, rest, value);
            return;
        }
        let index: usize = match segment.parse() {
            Ok(i) => i,
            Err(_) => return,
        };
        if !root.is_seq() {
            *root = Value::seq(Vec::new());
        }
        if let Some(items) = root.seq_mut() {
            if items.len() <= index {
                items.resize(index + 1, Value::Null);
            }
            deep_set(&mut items[index], rest, value);
        }
    } else {
        if !root.is_map() {
            *root = Value::map(Mapping::new());
        }
        descend_map(root, segment, rest, value);
    }
}

fn descend_map(root: &mut Value, key: &str, rest: &[&str], value: Value) {
    if let Some(entries) = root.map_mut() {
        let child = entries.entry(key.to_string()).or_insert(Value::Null);
        deep_set(child, rest, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn val(v: serde_json::Value) -> Value {
        Value::from(v)
    }

    #[test]
    fn test_sets_in_existing_containers() {
        let mut root = val(json!({"a": {"b": 1}}));
        deep_set(&mut root, &["a", "b"], val(json!(2)));
        assert_eq!(root.to_json(), json!({"a": {"b": 2}}));
    }

    #[test]
    fn test_creates_missing_mappings() {
        let mut root = val(json!({}));
        deep_set(&mut root, &["a", "b", "c"], val(json!("x")));
        assert_eq!(root.to_json(), json!({"a": {"b": {"c": "x"}}}));
    }

    #[test]
    fn test_numeric_segment_creates_padded_sequence() {
        let mut root = val(json!({}));
        deep_set(&mut root, &["a", "2"], val(json!(7)));
        assert_eq!(root.to_json(), json!({"a": [null, null, 7]}));
    }

    #[test]
    fn test_numeric_key_on_existing_mapping_stays_a_key() {
        let mut root = val(json!({"a": {"1": "x"}}));
        deep_set(&mut root, &["a", "1"], val(json!("y")));
        assert_eq!(root.to_json(), json!({"a": {"1": "y"}}));
    }

    #[test]
    fn test_extends_existing_sequence() {
        let mut root = val(json!({"a": [1]}));
        deep_set(&mut root, &["a", "3"], val(json!(4)));
        assert_eq!(root.to_json(), json!({"a": [1, null, null, 4]}));
    }

    #[test]
    fn test_scalar_replaced_by_container() {
        let mut root = val(json!({"a": 5}));
        deep_set(&mut root, &["a", "b"], val(json!(1)));
        assert_eq!(root.to_json(), json!({"a": {"b": 1}}));

        let mut root = val(json!({"a": 5}));
        deep_set(&mut root, &["a", "0"], val(json!(1)));
        assert_eq!(root.to_json(), json!({"a": [1]}));
    }

    #[test]
    fn test_leading_zero_index_is_a_mapping_key() {
        let mut root = val(json!({}));
        deep_set(&mut root, &["a", "01"], val(json!(1)));
        assert_eq!(root.to_json(), json!({"a": {"01": 1}}));
    }

    #[test]
    fn test_empty_path_replaces_root() {
        let mut root = val(json!({"a": 1}));
        deep_set(&mut root, &[], val(json!([1])));
        assert_eq!(root.to_json(), json!([1]));
    }

    #[test]
    fn test_untouched_siblings_keep_identity() {
        let root = val(json!({"bak": {"big": 1}}));
        let mut out = root.clone();
        deep_set(&mut out, &["foo", "bar"], val(json!(2)));
        assert!(out.get("bak").unwrap().ptr_eq(root.get("bak").unwrap()));
    }
}
