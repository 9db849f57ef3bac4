//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).
//! Every message is stable: callers and tests match on the exact text.

use thiserror::Error;

use crate::constants::{MSG_NO_PERMISSION, MSG_WRONG_CREDENTIALS};

/// Coarse classification used by transports to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing, empty, mistyped or badly formatted input
    InputMalformed,
    /// The write would violate a uniqueness rule
    Conflict,
    /// Bad credentials, bad token, or insufficient permission
    Unauthenticated,
    /// Anything else
    Other,
}

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Value absent (undefined or null)
    #[error("{0} is not optional")]
    NotOptional(String),

    /// String present but blank
    #[error("{0} is empty")]
    EmptyValue(String),

    /// Value has the wrong primitive kind
    #[error("{field} {value} is not a {expected}")]
    TypeMismatch {
        field: String,
        value: String,
        expected: &'static str,
    },

    /// Value has the right kind but the wrong shape
    #[error("{value} is not {expected}")]
    Format {
        value: String,
        expected: &'static str,
    },

    /// E-mail already registered
    #[error("user with email {0} already exists")]
    DuplicateEmail(String),

    /// Credentials or permissions rejected
    #[error("{0}")]
    Unauthorized(String),

    /// Token unparsable or signature mismatch
    #[error("jwt malformed")]
    MalformedToken,

    /// Token past its expiry
    #[error("jwt expired")]
    ExpiredToken,

    /// Entity not found
    #[error("{0}")]
    NotFound(String),

    /// Internal domain error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_optional(field: impl Into<String>) -> Self {
        DomainError::NotOptional(field.into())
    }

    pub fn empty(field: impl Into<String>) -> Self {
        DomainError::EmptyValue(field.into())
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        DomainError::TypeMismatch {
            field: field.into(),
            value: value.into(),
            expected,
        }
    }

    pub fn format(value: impl Into<String>, expected: &'static str) -> Self {
        DomainError::Format {
            value: value.into(),
            expected,
        }
    }

    /// The single credential failure, whatever the cause
    pub fn wrong_credentials() -> Self {
        DomainError::Unauthorized(MSG_WRONG_CREDENTIALS.to_string())
    }

    /// Ownership or elevation check failed
    pub fn no_permission() -> Self {
        DomainError::Unauthorized(MSG_NO_PERMISSION.to_string())
    }

    /// Create a not found error
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DomainError::NotFound(format!("{} with id {} not found", entity, id))
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }

    /// Classify this error for transport mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::NotOptional(_)
            | DomainError::EmptyValue(_)
            | DomainError::TypeMismatch { .. }
            | DomainError::Format { .. } => ErrorKind::InputMalformed,
            DomainError::DuplicateEmail(_) => ErrorKind::Conflict,
            DomainError::Unauthorized(_)
            | DomainError::MalformedToken
            | DomainError::ExpiredToken => ErrorKind::Unauthenticated,
            DomainError::NotFound(_) | DomainError::Internal(_) => ErrorKind::Other,
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            DomainError::not_optional("name").to_string(),
            "name is not optional"
        );
        assert_eq!(DomainError::empty("surname").to_string(), "surname is empty");
        assert_eq!(
            DomainError::type_mismatch("token", "", "string").to_string(),
            "token  is not a string"
        );
        assert_eq!(
            DomainError::format("a.com", "an e-mail").to_string(),
            "a.com is not an e-mail"
        );
        assert_eq!(DomainError::MalformedToken.to_string(), "jwt malformed");
        assert_eq!(
            DomainError::no_permission().to_string(),
            "You do not have permission to do this"
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(DomainError::empty("x").kind(), ErrorKind::InputMalformed);
        assert_eq!(
            DomainError::DuplicateEmail("a@b.com".into()).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(DomainError::ExpiredToken.kind(), ErrorKind::Unauthenticated);
        assert_eq!(
            DomainError::wrong_credentials().kind(),
            ErrorKind::Unauthenticated
        );
        assert_eq!(
            DomainError::not_found("order", "42").kind(),
            ErrorKind::Other
        );
    }
}
