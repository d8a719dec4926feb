//! Phone number entity owned by a customer.

use crate::domain::{Audit, CustomerId, PhoneKey, PhoneNumberId, PhoneType};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A phone number belonging to exactly one customer.
///
/// Equality and hashing follow the semantic key (normalized number, type,
/// country code). Identity, owner, verified flag and audit stamps are ignored,
/// so `==` answers "is this the same entry", not "is this the same row".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    pub id: PhoneNumberId,

    /// Owning customer; back-reference only, never serialized
    #[serde(skip)]
    pub customer_id: Option<CustomerId>,

    pub phone_number: String,

    pub phone_type: PhoneType,

    pub country_code: String,

    pub verified: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit: Option<Audit>,
}

impl PhoneNumber {
    /// Create an unowned, unpersisted phone number with a fresh identifier.
    pub fn new(
        phone_number: impl Into<String>,
        phone_type: PhoneType,
        country_code: impl Into<String>,
        verified: bool,
    ) -> Self {
        Self {
            id: PhoneNumberId::generate(),
            customer_id: None,
            phone_number: phone_number.into(),
            phone_type,
            country_code: country_code.into(),
            verified,
            audit: None,
        }
    }

    /// Semantic comparison key.
    pub fn key(&self) -> PhoneKey {
        PhoneKey::new(&self.phone_number, self.phone_type, &self.country_code)
    }

    /// Hand ownership to `customer_id`.
    pub fn owned_by(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for PhoneNumber {}

impl Hash for PhoneNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
