//! Data models for the customer registry.
//!
//! Entities (`Customer`, `PhoneNumber`) and the inbound payloads they are
//! built from.

pub mod customer;
pub mod payload;
pub mod phone_number;

pub use customer::Customer;
pub use payload::{CustomerPayload, PhoneNumberPayload};
pub use phone_number::PhoneNumber;
