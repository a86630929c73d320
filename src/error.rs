//! Structural misuse of a statement builder.

use thiserror::Error;

/// Result type alias for fallible builder operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A statement that cannot be built because of how it was configured.
///
/// These are programming errors; the panicking `build`/`on` methods abort
/// with this message while `try_build`/`try_on` hand it back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// DELETE without any WHERE predicate
    #[error("sqlchain: DELETE with no where clauses")]
    DeleteWithoutWhere,

    /// UPDATE without any SET column
    #[error("sqlchain: UPDATE with no columns set")]
    UpdateWithoutSet,

    /// A `table.column` reference that does not contain exactly one dot
    #[error("sqlchain: no way to split '{0}' at the dot")]
    MalformedDotted(String),
}
