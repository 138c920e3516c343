//! Error types for the entity model
//!
//! One enum covers every failure the model surfaces. We use `thiserror`
//! for automatic `Display` and `Error` trait implementations.
//!
//! Propagation policy: every error is returned synchronously from the
//! operation that detected it; nothing is retried at this layer. Retry
//! policy, if any, belongs to the store implementation.

use crate::value::ValueKind;
use thiserror::Error;

/// Result type alias for entity-model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the entity model
#[derive(Debug, Error)]
pub enum Error {
    /// A typed accessor was invoked against a stored value of a different
    /// category. Never a silent coercion.
    #[error("type mismatch on property {property:?}: expected {expected}, found {actual}")]
    TypeMismatch {
        /// Property name the accessor was invoked with
        property: String,
        /// Category the caller asked for
        expected: ValueKind,
        /// Category actually stored
        actual: ValueKind,
    },

    /// The operation requires an existing entity but none exists and
    /// creation was disallowed.
    #[error("entity {id:?} not found in scope {scope:?}")]
    NotFound {
        /// Document scope searched
        scope: String,
        /// Identifier searched
        id: String,
    },

    /// Creation was requested for an identifier already bound in the scope.
    #[error("entity {id:?} already exists in scope {scope:?}")]
    AlreadyExists {
        /// Document scope
        scope: String,
        /// Conflicting identifier
        id: String,
    },

    /// Malformed caller input (empty property name, unmintable id hint, ...)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The backing store signaled an internal or I/O fault. Propagated
    /// opaquely upward, never interpreted here.
    #[error("store failure: {0}")]
    Store(String),
}

impl Error {
    /// Build a `TypeMismatch` error
    pub fn type_mismatch(property: impl Into<String>, expected: ValueKind, actual: ValueKind) -> Self {
        Error::TypeMismatch {
            property: property.into(),
            expected,
            actual,
        }
    }

    /// Build a `NotFound` error
    pub fn not_found(scope: impl Into<String>, id: impl Into<String>) -> Self {
        Error::NotFound {
            scope: scope.into(),
            id: id.into(),
        }
    }

    /// Build an `AlreadyExists` error
    pub fn already_exists(scope: impl Into<String>, id: impl Into<String>) -> Self {
        Error::AlreadyExists {
            scope: scope.into(),
            id: id.into(),
        }
    }

    /// Build an `InvalidArgument` error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Build a `Store` error from an engine fault
    pub fn store(msg: impl Into<String>) -> Self {
        Error::Store(msg.into())
    }

    /// Check if this is a type-mismatch error
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::TypeMismatch { .. })
    }

    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if this is an already-exists error
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Error::AlreadyExists { .. })
    }

    /// Check if this is an opaque store fault
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Error::Store(_))
    }
}
