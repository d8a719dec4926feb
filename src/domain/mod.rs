//! Domain value objects and types.
//!
//! Identifiers, the phone normalizer and its comparison key, audit stamps,
//! and the field-level validation error records.

pub mod audit;
pub mod errors;
pub mod ids;
pub mod phone;

pub use audit::Audit;
pub use errors::{FieldError, ValidationError, ValidationErrors};
pub use ids::{CustomerId, PhoneNumberId};
pub use phone::{normalize_phone_number, PhoneKey, PhoneType};
