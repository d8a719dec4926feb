//! Customer aggregate root.

use super::payload::CustomerPayload;
use super::phone_number::PhoneNumber;
use crate::domain::{Audit, CustomerId};
use serde::{Deserialize, Serialize};

/// A customer together with the phone numbers it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique identifier, assigned at creation
    pub id: CustomerId,

    pub first_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,

    pub last_name: String,

    /// Unique across all customers
    pub email_address: String,

    /// Owned phone numbers; order carries no meaning
    #[serde(default)]
    pub phone_numbers: Vec<PhoneNumber>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit: Option<Audit>,
}

impl Customer {
    /// Create a new, unpersisted customer from a payload's scalar fields.
    ///
    /// Phone numbers are attached separately once they have been built.
    pub fn from_payload(payload: &CustomerPayload) -> Self {
        Self {
            id: CustomerId::generate(),
            first_name: payload.first_name.clone(),
            middle_name: payload.middle_name.clone(),
            last_name: payload.last_name.clone(),
            email_address: payload.email_address.clone(),
            phone_numbers: Vec::new(),
            audit: None,
        }
    }

    /// Overwrite the scalar fields with the payload's values.
    pub fn apply(&mut self, payload: &CustomerPayload) {
        self.first_name = payload.first_name.clone();
        self.middle_name = payload.middle_name.clone();
        self.last_name = payload.last_name.clone();
        self.email_address = payload.email_address.clone();
    }

    /// Display name, including the middle name when present.
    pub fn full_name(&self) -> String {
        match self.middle_name.as_deref().map(str::trim) {
            Some(middle) if !middle.is_empty() => {
                format!("{} {} {}", self.first_name, middle, self.last_name)
            }
            _ => format!("{} {}", self.first_name, self.last_name),
        }
    }

    /// Copy of this customer without its phone collection.
    pub fn without_phones(&self) -> Self {
        Self {
            phone_numbers: Vec::new(),
            ..self.clone()
        }
    }
}
