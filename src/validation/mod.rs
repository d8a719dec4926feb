//! Payload validation.
//!
//! The [`ValidationOracle`] answers format questions; the [`FieldValidator`]
//! applies it, plus the payload limits, to a whole candidate customer.

pub mod field_validator;
pub mod oracle;

pub use field_validator::{fields, FieldValidator, PayloadLimits};
pub use oracle::{DefaultValidationOracle, ValidationOracle};
