//! Error types for attribute storage.

use std::error::Error;
use std::fmt;

use crate::id::{AttrId, EntryId, RegistryId};

/// Errors from registry lookups and array appends.
///
/// Cursor navigation outside `[begin, end)` is a programming error and
/// panics instead of producing one of these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The attribute is registered but no data has been appended to it.
    NotFound {
        /// The attribute that has no array.
        attr: AttrId,
    },
    /// No attribute is registered under this name.
    UnknownName {
        /// The name that was looked up.
        name: String,
    },
    /// The token was issued by a different registry.
    ForeignAttribute {
        /// The attribute ID carried by the token.
        attr: AttrId,
        /// The registry that issued the token.
        registry: RegistryId,
    },
    /// A name is already registered with a different element type.
    TypeMismatch {
        /// The attribute name.
        name: String,
        /// Element type of the existing registration.
        expected: &'static str,
        /// Element type requested by the caller.
        actual: &'static str,
    },
    /// An interval is malformed or overlaps an attribute's existing domain.
    InvalidRange {
        /// Lower bound of the rejected interval.
        lower: EntryId,
        /// Upper bound of the rejected interval.
        upper: EntryId,
        /// What was wrong with it.
        reason: String,
    },
    /// The number of values does not match the interval length.
    InvalidArgument {
        /// Entries covered by the interval.
        expected: usize,
        /// Values supplied.
        actual: usize,
    },
    /// The registry cannot issue another attribute ID.
    CapacityExceeded {
        /// Number of attributes already registered.
        count: usize,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { attr } => write!(f, "attribute {attr} has no data"),
            Self::UnknownName { name } => write!(f, "no attribute named '{name}'"),
            Self::ForeignAttribute { attr, registry } => {
                write!(f, "attribute {attr} was issued by registry {registry}")
            }
            Self::TypeMismatch {
                name,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "attribute '{name}' holds {expected}, requested as {actual}"
                )
            }
            Self::InvalidRange {
                lower,
                upper,
                reason,
            } => write!(f, "invalid range [{lower}, {upper}): {reason}"),
            Self::InvalidArgument { expected, actual } => {
                write!(f, "expected {expected} values, got {actual}")
            }
            Self::CapacityExceeded { count } => {
                write!(f, "attribute capacity exceeded: {count} registered")
            }
        }
    }
}

impl Error for StoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_values() {
        let err = StoreError::InvalidRange {
            lower: 2,
            upper: 6,
            reason: "overlaps existing domain".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid range [2, 6): overlaps existing domain"
        );

        let err = StoreError::InvalidArgument {
            expected: 3,
            actual: 5,
        };
        assert_eq!(err.to_string(), "expected 3 values, got 5");
    }
}
