//! The copy-on-write structural updater.
//!
//! [`Updater`] walks a dotted path into a composite root, one recursion
//! frame per segment, replacing every container on the path while leaving
//! every sibling subtree shared with the input. The value at the terminal
//! segment is produced by a caller-supplied transform.
//!
//! Two families of entry points share the algorithm:
//! - copy-root ([`Updater::update`], [`Updater::update_with`]) returns a new
//!   root and never touches the caller's value;
//! - mutate-root ([`Updater::update_in`], [`Updater::update_in_with`]) edits
//!   the given root in place, still copy-on-write below it.

use std::fmt;
use std::rc::Rc;

use update_path_deep_set::deep_set;
use update_path_value::Value;

use crate::error::UpdateError;
use crate::lookup::{self, Equality, Lookup};
use crate::path::{self, Segment};

/// Fallible transform threaded through the recursive walk. The public
/// entry points wrap infallible caller transforms; the operation library
/// uses the error channel for precondition failures.
pub(crate) type Transform<'a> = dyn FnMut(Option<Value>) -> Result<Value, UpdateError> + 'a;

/// Host hook deciding what an unresolved lookup means, given the scanned
/// sequence and the predicate that matched nothing.
pub type LookupHook = Rc<dyn Fn(&[Value], &Lookup) -> Result<(), UpdateError>>;

/// What to do when a lookup predicate matches no element.
#[derive(Clone, Default)]
pub enum MissingLookup {
    /// Fail the call with [`UpdateError::LookupNotFound`]. The strict
    /// default.
    #[default]
    Error,
    /// Emit a `tracing` warning and leave the subtree unchanged.
    WarnSkip,
    /// Leave the subtree unchanged, no diagnostic.
    SilentSkip,
    /// Delegate the decision to a host hook.
    Custom(LookupHook),
}

impl MissingLookup {
    fn on_not_found(&self, items: &[Value], lookup: &Lookup) -> Result<(), UpdateError> {
        match self {
            MissingLookup::Error => Err(UpdateError::LookupNotFound(lookup.raw().to_string())),
            MissingLookup::WarnSkip => {
                tracing::warn!(
                    lookup = lookup.raw(),
                    "no element matched lookup, leaving subtree unchanged"
                );
                Ok(())
            }
            MissingLookup::SilentSkip => Ok(()),
            MissingLookup::Custom(hook) => hook(items, lookup),
        }
    }
}

impl fmt::Debug for MissingLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingLookup::Error => f.write_str("Error"),
            MissingLookup::WarnSkip => f.write_str("WarnSkip"),
            MissingLookup::SilentSkip => f.write_str("SilentSkip"),
            MissingLookup::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Path-addressed updater with explicit, per-instance configuration.
///
/// The default instance errors on unresolved lookups and compares predicate
/// terms coercively; both knobs are injectable rather than ambient state.
#[derive(Debug, Clone, Default)]
pub struct Updater {
    pub missing_lookup: MissingLookup,
    pub equality: Equality,
}

impl Updater {
    pub fn new() -> Updater {
        Updater::default()
    }

    pub fn with_missing_lookup(mut self, policy: MissingLookup) -> Updater {
        self.missing_lookup = policy;
        self
    }

    pub fn with_equality(mut self, equality: Equality) -> Updater {
        self.equality = equality;
        self
    }

    /// Set `value` at `path`, returning a new root. The input root is
    /// untouched at every level.
    pub fn update(
        &self,
        root: &Value,
        path: &str,
        value: impl Into<Value>,
    ) -> Result<Value, UpdateError> {
        let value = value.into();
        self.update_with(root, path, move |_| value.clone())
    }

    /// Apply `transform` to the value at `path`, returning a new root.
    ///
    /// The transform receives the old value, or `None` when the path does
    /// not yet exist; missing intermediate containers are then created.
    pub fn update_with<F>(&self, root: &Value, path: &str, mut transform: F) -> Result<Value, UpdateError>
    where
        F: FnMut(Option<Value>) -> Value,
    {
        let mut out = root.clone();
        self.apply(&mut out, path, &mut |old| Ok(transform(old)))?;
        Ok(out)
    }

    /// Set `value` at `path`, editing `root` in place.
    ///
    /// The root value itself is reused; every container below it on the
    /// path is still copied before mutation when shared, so subtrees held
    /// elsewhere are never edited through.
    pub fn update_in(
        &self,
        root: &mut Value,
        path: &str,
        value: impl Into<Value>,
    ) -> Result<(), UpdateError> {
        let value = value.into();
        self.update_in_with(root, path, move |_| value.clone())
    }

    /// Apply `transform` at `path`, editing `root` in place.
    pub fn update_in_with<F>(&self, root: &mut Value, path: &str, mut transform: F) -> Result<(), UpdateError>
    where
        F: FnMut(Option<Value>) -> Value,
    {
        self.apply(root, path, &mut |old| Ok(transform(old)))
    }

    /// Recursive engine: one frame per path segment.
    pub(crate) fn apply(&self, node: &mut Value, path: &str, f: &mut Transform) -> Result<(), UpdateError> {
        match path::split_first(path)? {
            (Segment::Lookup(raw), rest) => self.apply_lookup(node, raw, rest, f),
            (Segment::Key(key), rest) => self.apply_key(node, key, rest, path, f),
        }
    }

    fn apply_lookup(
        &self,
        node: &mut Value,
        raw: &str,
        rest: Option<&str>,
        f: &mut Transform,
    ) -> Result<(), UpdateError> {
        let lookup = Lookup::parse(raw)?;
        let Value::Seq(items) = node else {
            return Err(UpdateError::LookupOnNonSequence);
        };
        let Some(index) = lookup::resolve_index(items.as_slice(), &lookup, self.equality) else {
            return self.missing_lookup.on_not_found(items.as_slice(), &lookup);
        };
        let items = Rc::make_mut(items);
        match rest {
            None => {
                let old = items[index].clone();
                items[index] = f(Some(old))?;
                Ok(())
            }
            Some(rest) => self.apply(&mut items[index], rest, f),
        }
    }

    fn apply_key(
        &self,
        node: &mut Value,
        key: &str,
        rest: Option<&str>,
        full_path: &str,
        f: &mut Transform,
    ) -> Result<(), UpdateError> {
        // Existence probe before any copy: a missing slot routes the whole
        // remaining path to the autocreating deep setter.
        let slot = match &*node {
            Value::Map(entries) => {
                if entries.contains_key(key) {
                    Slot::MapKey
                } else {
                    Slot::Missing
                }
            }
            Value::Seq(items) => {
                let index: usize = key
                    .parse()
                    .map_err(|_| UpdateError::InvalidIndex(key.to_string()))?;
                if index < items.len() {
                    Slot::SeqIndex(index)
                } else {
                    Slot::Missing
                }
            }
            // Scalars mid-path count as missing containers.
            _ => Slot::Missing,
        };

        match slot {
            Slot::Missing => autocreate(node, full_path, rest, f),
            Slot::MapKey => {
                let Some(entries) = node.map_mut() else {
                    return Ok(());
                };
                let child = entries.entry(key.to_string()).or_insert(Value::Null);
                match rest {
                    None => {
                        let old = child.clone();
                        *child = f(Some(old))?;
                        Ok(())
                    }
                    Some(rest) => self.apply(child, rest, f),
                }
            }
            Slot::SeqIndex(index) => {
                let Some(items) = node.seq_mut() else {
                    return Ok(());
                };
                match rest {
                    None => {
                        let old = items[index].clone();
                        items[index] = f(Some(old))?;
                        Ok(())
                    }
                    Some(rest) => self.apply(&mut items[index], rest, f),
                }
            }
        }
    }
}

enum Slot {
    MapKey,
    SeqIndex(usize),
    Missing,
}

fn autocreate(
    node: &mut Value,
    path: &str,
    rest: Option<&str>,
    f: &mut Transform,
) -> Result<(), UpdateError> {
    // A lookup anywhere in the remainder can never resolve against the
    // containers about to be created.
    if let Some(rest) = rest {
        if path::contains_lookup(rest) {
            return Err(UpdateError::AutocreateWithLookup);
        }
    }
    let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
    let value = f(None)?;
    deep_set(node, &segments, value);
    Ok(())
}

/// [`Updater::update`] with the default configuration.
pub fn update(root: &Value, path: &str, value: impl Into<Value>) -> Result<Value, UpdateError> {
    Updater::new().update(root, path, value)
}

/// [`Updater::update_with`] with the default configuration.
pub fn update_with<F>(root: &Value, path: &str, transform: F) -> Result<Value, UpdateError>
where
    F: FnMut(Option<Value>) -> Value,
{
    Updater::new().update_with(root, path, transform)
}

/// [`Updater::update_in`] with the default configuration.
pub fn update_in(root: &mut Value, path: &str, value: impl Into<Value>) -> Result<(), UpdateError> {
    Updater::new().update_in(root, path, value)
}

/// [`Updater::update_in_with`] with the default configuration.
pub fn update_in_with<F>(root: &mut Value, path: &str, transform: F) -> Result<(), UpdateError>
where
    F: FnMut(Option<Value>) -> Value,
{
    Updater::new().update_in_with(root, path, transform)
}
