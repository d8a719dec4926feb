//! Error types for the customer registry.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::{CustomerId, ValidationErrors};
use thiserror::Error;

/// Errors surfaced by a persistence store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A unique index rejected the write
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// A write referenced a missing or absent owner row
    #[error("Integrity constraint violated: {0}")]
    IntegrityViolation(String),

    /// A row the transaction read was changed underneath it
    #[error("Concurrent modification: {0}")]
    Conflict(String),

    /// The transaction was already committed
    #[error("Transaction already committed")]
    TransactionClosed,

    /// The store could not serve the request
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Outcomes of a customer operation other than success.
///
/// `ValidationFailed`, `DuplicateEmail` and `NotFound` are expected results the
/// caller reports back; `Store` carries every other persistence fault untouched.
#[derive(Error, Debug)]
pub enum CustomerError {
    /// One or more fields failed validation
    #[error("Validation failed: {0}")]
    ValidationFailed(ValidationErrors),

    /// Another customer already owns the email address
    #[error("Email address already exists: {0}")]
    DuplicateEmail(String),

    /// No customer with the given identifier
    #[error("Customer not found: {0}")]
    NotFound(CustomerId),

    /// Unhandled persistence failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CustomerError {
    /// Whether this is one of the expected, caller-reportable outcomes.
    pub fn is_expected(&self) -> bool {
        !matches!(self, Self::Store(_))
    }

    /// HTTP status an HTTP adapter should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ValidationFailed(_) | Self::DuplicateEmail(_) => 400,
            Self::NotFound(_) => 404,
            Self::Store(_) => 500,
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with CustomerError
pub type CustomerResult<T> = Result<T, CustomerError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldError;

    #[test]
    fn test_error_display() {
        let err = StoreError::UniqueViolation {
            constraint: "customer_email_key".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unique constraint violated: customer_email_key"
        );

        let err = ConfigError::InvalidValue {
            var: "MAX_NAME_LENGTH".to_string(),
            reason: "Must be greater than 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for MAX_NAME_LENGTH: Must be greater than 0"
        );

        let err = CustomerError::DuplicateEmail("jane@example.com".to_string());
        assert_eq!(
            err.to_string(),
            "Email address already exists: jane@example.com"
        );
    }

    #[test]
    fn test_store_error_passes_through() {
        let err: CustomerError = StoreError::Unavailable("disk full".to_string()).into();
        assert_eq!(err.to_string(), "Store unavailable: disk full");
        assert!(!err.is_expected());
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_conflict_is_a_store_fault() {
        let err: CustomerError = StoreError::Conflict("customer gone".to_string()).into();
        assert_eq!(err.to_string(), "Concurrent modification: customer gone");
        assert!(!err.is_expected());
    }

    #[test]
    fn test_status_codes() {
        let errors: ValidationErrors = FieldError::new("emailAddress", "bad").into();
        assert_eq!(CustomerError::ValidationFailed(errors).status_code(), 400);
        assert_eq!(
            CustomerError::DuplicateEmail("a@b.co".to_string()).status_code(),
            400
        );
        let missing = CustomerError::NotFound(CustomerId::generate());
        assert_eq!(missing.status_code(), 404);
        assert!(missing.is_expected());
    }
}
