//! Inbound payloads for create and update.
//!
//! Fields default to empty so a missing value reaches the validator and is
//! reported alongside every other failure instead of failing deserialization.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Candidate customer data, as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomerPayload {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email_address: String,
    pub phone_numbers: Vec<PhoneNumberPayload>,
}

/// Candidate phone entry, unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct PhoneNumberPayload {
    /// Raw number, formatting allowed
    pub phone_number: String,

    /// One of MOBILE, HOME, WORK
    pub phone_type: String,

    /// ISO region the number is dialled from, e.g. "US"
    pub country_code: String,

    #[serde(alias = "isVerified")]
    pub verified: bool,
}

impl PhoneNumberPayload {
    pub fn new(
        phone_number: impl Into<String>,
        phone_type: impl Into<String>,
        country_code: impl Into<String>,
        verified: bool,
    ) -> Self {
        Self {
            phone_number: phone_number.into(),
            phone_type: phone_type.into(),
            country_code: country_code.into(),
            verified,
        }
    }
}
