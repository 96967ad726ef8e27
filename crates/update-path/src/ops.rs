//! Sequence and mapping operations built on the structural updater.
//!
//! Every operation exists in two forms on [`Updater`]: a copy-root form
//! returning a new root (`push`, `pop`, …) and a mutate-root `_in` form
//! editing the given root in place. Free functions mirror the copy-root
//! forms with the default configuration. All of them are ordinary
//! transforms handed to the updater, so structural sharing and path
//! semantics are identical to [`Updater::update_with`].

use update_path_value::Value;

use crate::error::UpdateError;
use crate::lookup::{self, Lookup};
use crate::path;
use crate::update::Updater;

impl Updater {
    /// Append `item` at the tail of the sequence at `path`.
    pub fn push(&self, root: &Value, path: &str, item: impl Into<Value>) -> Result<Value, UpdateError> {
        let mut out = root.clone();
        self.push_in(&mut out, path, item)?;
        Ok(out)
    }

    pub fn push_in(&self, root: &mut Value, path: &str, item: impl Into<Value>) -> Result<(), UpdateError> {
        let item = item.into();
        self.apply(root, path, &mut |old| {
            seq_edit(old, |items| items.push(item.clone()))
        })
    }

    /// Insert `item` at the head of the sequence at `path`.
    pub fn unshift(&self, root: &Value, path: &str, item: impl Into<Value>) -> Result<Value, UpdateError> {
        let mut out = root.clone();
        self.unshift_in(&mut out, path, item)?;
        Ok(out)
    }

    pub fn unshift_in(&self, root: &mut Value, path: &str, item: impl Into<Value>) -> Result<(), UpdateError> {
        let item = item.into();
        self.apply(root, path, &mut |old| {
            seq_edit(old, |items| items.insert(0, item.clone()))
        })
    }

    /// Drop the last element of the sequence at `path`. An empty sequence
    /// stays empty.
    pub fn pop(&self, root: &Value, path: &str) -> Result<Value, UpdateError> {
        let mut out = root.clone();
        self.pop_in(&mut out, path)?;
        Ok(out)
    }

    pub fn pop_in(&self, root: &mut Value, path: &str) -> Result<(), UpdateError> {
        self.apply(root, path, &mut |old| {
            seq_edit(old, |items| {
                items.pop();
            })
        })
    }

    /// Drop the first element of the sequence at `path`. An empty sequence
    /// stays empty.
    pub fn shift(&self, root: &Value, path: &str) -> Result<Value, UpdateError> {
        let mut out = root.clone();
        self.shift_in(&mut out, path)?;
        Ok(out)
    }

    pub fn shift_in(&self, root: &mut Value, path: &str) -> Result<(), UpdateError> {
        self.apply(root, path, &mut |old| {
            seq_edit(old, |items| {
                if !items.is_empty() {
                    items.remove(0);
                }
            })
        })
    }

    /// Shallow-merge `fields` into the mapping at `path`, overwriting on
    /// key collision. A missing target takes `fields` as its value.
    pub fn assign(&self, root: &Value, path: &str, fields: impl Into<Value>) -> Result<Value, UpdateError> {
        let mut out = root.clone();
        self.assign_in(&mut out, path, fields)?;
        Ok(out)
    }

    pub fn assign_in(&self, root: &mut Value, path: &str, fields: impl Into<Value>) -> Result<(), UpdateError> {
        let fields = fields.into();
        let Value::Map(fields) = fields else {
            return Err(UpdateError::NotAMapping);
        };
        self.apply(root, path, &mut |old| match old {
            Some(Value::Map(entries)) => {
                let mut merged = entries.as_ref().clone();
                for (k, v) in fields.iter() {
                    merged.insert(k.clone(), v.clone());
                }
                Ok(Value::map(merged))
            }
            None => Ok(Value::Map(fields.clone())),
            Some(_) => Err(UpdateError::NotAMapping),
        })
    }

    /// Remove the key named by the path's last segment from the mapping at
    /// the parent path. A single-segment path deletes from the root itself.
    pub fn del(&self, root: &Value, path: &str) -> Result<Value, UpdateError> {
        let mut out = root.clone();
        self.del_in(&mut out, path)?;
        Ok(out)
    }

    pub fn del_in(&self, root: &mut Value, path: &str) -> Result<(), UpdateError> {
        match path::split_last(path) {
            Some((parent, key)) => self.apply(root, parent, &mut |old| match old {
                Some(Value::Map(entries)) => {
                    let mut entries = entries.as_ref().clone();
                    entries.shift_remove(key);
                    Ok(Value::map(entries))
                }
                _ => Err(UpdateError::NotAMapping),
            }),
            None => {
                let Some(entries) = root.map_mut() else {
                    return Err(UpdateError::NotAMapping);
                };
                entries.shift_remove(path);
                Ok(())
            }
        }
    }

    /// Remove one element from the sequence at the path's parent. The last
    /// segment is a literal index or a lookup predicate; an unresolvable
    /// index (non-numeric, out of range, or an unmatched predicate) leaves
    /// the sequence unchanged. A single-segment path addresses the whole
    /// root and is a no-op.
    pub fn remove(&self, root: &Value, path: &str) -> Result<Value, UpdateError> {
        let mut out = root.clone();
        self.remove_in(&mut out, path)?;
        Ok(out)
    }

    pub fn remove_in(&self, root: &mut Value, path: &str) -> Result<(), UpdateError> {
        let Some((parent, last)) = path::split_last(path) else {
            return Ok(());
        };
        let last_lookup = if path::is_lookup(last) {
            Some(Lookup::parse(last)?)
        } else {
            None
        };
        let equality = self.equality;
        self.apply(root, parent, &mut |old| match old {
            Some(Value::Seq(items)) => {
                let index = match &last_lookup {
                    Some(lookup) => lookup::resolve_index(items.as_ref(), lookup, equality),
                    None => last.parse::<usize>().ok(),
                };
                let mut items = items.as_ref().clone();
                if let Some(i) = index {
                    if i < items.len() {
                        items.remove(i);
                    }
                }
                Ok(Value::seq(items))
            }
            _ => Err(UpdateError::NotASequence),
        })
    }
}

fn seq_edit(old: Option<Value>, edit: impl FnOnce(&mut Vec<Value>)) -> Result<Value, UpdateError> {
    match old {
        Some(Value::Seq(items)) => {
            let mut items = items.as_ref().clone();
            edit(&mut items);
            Ok(Value::seq(items))
        }
        _ => Err(UpdateError::NotASequence),
    }
}

/// [`Updater::push`] with the default configuration.
pub fn push(root: &Value, path: &str, item: impl Into<Value>) -> Result<Value, UpdateError> {
    Updater::new().push(root, path, item)
}

/// [`Updater::unshift`] with the default configuration.
pub fn unshift(root: &Value, path: &str, item: impl Into<Value>) -> Result<Value, UpdateError> {
    Updater::new().unshift(root, path, item)
}

/// [`Updater::pop`] with the default configuration.
pub fn pop(root: &Value, path: &str) -> Result<Value, UpdateError> {
    Updater::new().pop(root, path)
}

/// [`Updater::shift`] with the default configuration.
pub fn shift(root: &Value, path: &str) -> Result<Value, UpdateError> {
    Updater::new().shift(root, path)
}

/// [`Updater::assign`] with the default configuration.
pub fn assign(root: &Value, path: &str, fields: impl Into<Value>) -> Result<Value, UpdateError> {
    Updater::new().assign(root, path, fields)
}

/// [`Updater::del`] with the default configuration.
pub fn del(root: &Value, path: &str) -> Result<Value, UpdateError> {
    Updater::new().del(root, path)
}

/// [`Updater::remove`] with the default configuration.
pub fn remove(root: &Value, path: &str) -> Result<Value, UpdateError> {
    Updater::new().remove(root, path)
}
