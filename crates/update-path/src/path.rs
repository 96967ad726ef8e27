//! Path grammar.
//!
//! A path is a `.`-separated string. A segment is either a key
//! (alphanumerics plus `:`, `_`, `-`) or a lookup predicate wrapped in
//! braces, e.g. `{id:2,type:bar}`. There is no escaping mechanism for a
//! literal `.`, `{`, or `}` inside a key.

use crate::error::UpdateError;

/// One parsed path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Mapping key or numeric sequence index.
    Key(&'a str),
    /// Lookup predicate, including the surrounding braces.
    Lookup(&'a str),
}

/// Split off the leading segment; the rest is `None` for a terminal segment.
///
/// An empty path, an empty leading segment, or a segment outside the grammar
/// is a contract violation and fails with [`UpdateError::InvalidPath`].
pub fn split_first(path: &str) -> Result<(Segment<'_>, Option<&str>), UpdateError> {
    let (head, rest) = match path.find('.') {
        Some(dot) => (&path[..dot], Some(&path[dot + 1..])),
        None => (path, None),
    };
    let rest = rest.filter(|r| !r.is_empty());

    if is_lookup(head) {
        return Ok((Segment::Lookup(head), rest));
    }
    if is_key(head) {
        return Ok((Segment::Key(head), rest));
    }
    Err(UpdateError::InvalidPath(path.to_string()))
}

/// Split at the final separator: `a.b.c` → `("a.b", "c")`.
///
/// `None` when the path holds a single segment and has no parent.
pub fn split_last(path: &str) -> Option<(&str, &str)> {
    let dot = path.rfind('.')?;
    let (parent, last) = (&path[..dot], &path[dot + 1..]);
    if parent.is_empty() || last.is_empty() {
        return None;
    }
    Some((parent, last))
}

/// True when `segment` is a brace-wrapped lookup predicate.
pub fn is_lookup(segment: &str) -> bool {
    segment.len() > 2 && segment.starts_with('{') && segment.ends_with('}')
}

/// True when a lookup predicate appears anywhere in `path`.
///
/// Autocreate must refuse the whole remainder if any part of it is a lookup,
/// not just its head: the lookup could never resolve against a
/// just-created empty container.
pub fn contains_lookup(path: &str) -> bool {
    match path.find('{') {
        Some(open) => path[open + 1..].contains('}'),
        None => false,
    }
}

fn is_key(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_alphanumeric() || c == ':' || c == '_' || c == '-')
}
