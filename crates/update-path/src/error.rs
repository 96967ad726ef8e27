use thiserror::Error;

/// Failures of path parsing, lookup resolution, and the update operations.
///
/// All variants are deterministic for a given input and propagate to the
/// entry-point caller; nothing is caught or retried internally.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UpdateError {
    /// The path (or one of its segments) does not match the grammar.
    #[error("invalid path segment in {0:?}")]
    InvalidPath(String),

    /// A lookup segment was applied to a container that is not a sequence.
    #[error("object lookup is available only for existing sequences")]
    LookupOnNonSequence,

    /// No sequence element matched the lookup predicate.
    #[error("no element found by {0}, autocreate is not supported")]
    LookupNotFound(String),

    /// The path requires creating a container and then resolving a lookup
    /// against it.
    #[error("autocreate with a lookup path is not supported")]
    AutocreateWithLookup,

    /// A non-numeric key addressed a sequence.
    #[error("invalid sequence index {0:?}")]
    InvalidIndex(String),

    /// The operation requires a sequence at the addressed path.
    #[error("expected a sequence at the target path")]
    NotASequence,

    /// The operation requires a mapping at the addressed path.
    #[error("expected a mapping at the target path")]
    NotAMapping,
}
