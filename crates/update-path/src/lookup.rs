//! Lookup predicate parsing and resolution.
//!
//! A lookup predicate selects a sequence element by field equality instead
//! of a numeric index: `{id:2,type:bar}` matches the first element whose
//! `id` field equals `2` AND whose `type` field equals `bar`.

use update_path_value::Value;

use crate::error::UpdateError;

/// How predicate term text compares against typed field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Equality {
    /// Textual terms match string fields directly and coerce against
    /// numeric and boolean fields (`id:2` matches a numeric `2`). The
    /// compatible default.
    #[default]
    Coerce,
    /// Textual terms match string fields only.
    Strict,
}

/// A parsed lookup predicate: ordered `(field, expected)` equality terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    raw: String,
    terms: Vec<(String, String)>,
}

impl Lookup {
    /// Parse a brace-wrapped predicate segment, e.g. `{id:2,type:bar}`.
    ///
    /// Every comma-separated term must be of the form `field:value`.
    pub fn parse(segment: &str) -> Result<Lookup, UpdateError> {
        let inner = segment
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .filter(|s| !s.is_empty())
            .ok_or_else(|| UpdateError::InvalidPath(segment.to_string()))?;

        let mut terms = Vec::new();
        for term in inner.split(',') {
            let (field, expected) = term
                .split_once(':')
                .filter(|(field, _)| !field.is_empty())
                .ok_or_else(|| UpdateError::InvalidPath(segment.to_string()))?;
            terms.push((field.to_string(), expected.to_string()));
        }
        Ok(Lookup {
            raw: segment.to_string(),
            terms,
        })
    }

    /// The original predicate text, braces included. Used in diagnostics.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn terms(&self) -> &[(String, String)] {
        &self.terms
    }

    /// True when `element` satisfies every term of the predicate.
    ///
    /// Non-mapping elements (including nulls) never match and never fail.
    pub fn matches(&self, element: &Value, equality: Equality) -> bool {
        let Some(entries) = element.as_map() else {
            return false;
        };
        self.terms.iter().all(|(field, expected)| {
            entries
                .get(field)
                .is_some_and(|v| field_eq(v, expected, equality))
        })
    }
}

/// Index of the first element of `items` matching `lookup`, scanning in
/// order. `None` when nothing matches.
pub fn resolve_index(items: &[Value], lookup: &Lookup, equality: Equality) -> Option<usize> {
    items.iter().position(|el| lookup.matches(el, equality))
}

fn field_eq(value: &Value, expected: &str, equality: Equality) -> bool {
    match value {
        Value::Str(s) => s == expected,
        _ if equality == Equality::Strict => false,
        Value::Num(n) => expected.parse::<f64>().map(|t| t == *n).unwrap_or(false),
        Value::Bool(b) => expected == if *b { "true" } else { "false" },
        _ => false,
    }
}
