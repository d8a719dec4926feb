//! Exhaustive payload validation.
//!
//! Every rule runs on every call; failures accumulate into one
//! [`ValidationErrors`] instead of stopping at the first. Uniqueness is not
//! checked here since it needs the store.

use super::oracle::ValidationOracle;
use crate::domain::{FieldError, PhoneType, ValidationErrors};
use crate::models::{CustomerPayload, PhoneNumber, PhoneNumberPayload};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

/// Raw number shape: optional leading `+`, then 10 to 15 digits, nothing else.
static PHONE_NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9]{10,15}$").expect("Failed to compile phone number pattern")
});

const PHONE_NUMBER_PATTERN_MESSAGE: &str =
    "Phone number must be a valid international number (E.164 format)";

/// Field keys used in error records.
pub mod fields {
    pub const FIRST_NAME: &str = "firstName";
    pub const MIDDLE_NAME: &str = "middleName";
    pub const LAST_NAME: &str = "lastName";
    pub const EMAIL_ADDRESS: &str = "emailAddress";
    pub const PHONE_NUMBERS: &str = "phoneNumbers";
    pub const PHONE_NUMBER: &str = "phoneNumber";
    pub const PHONE_TYPE: &str = "phoneType";
    pub const COUNTRY_CODE: &str = "countryCode";
}

/// Size and presence limits applied to payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadLimits {
    pub max_name_length: usize,
    pub max_country_code_length: usize,
    pub require_phone_numbers: bool,
}

impl Default for PayloadLimits {
    fn default() -> Self {
        Self {
            max_name_length: 255,
            max_country_code_length: 10,
            require_phone_numbers: true,
        }
    }
}

/// Validates candidate customers against the payload limits and the oracle.
#[derive(Clone)]
pub struct FieldValidator {
    oracle: Arc<dyn ValidationOracle>,
    limits: PayloadLimits,
}

impl FieldValidator {
    pub fn new(oracle: Arc<dyn ValidationOracle>, limits: PayloadLimits) -> Self {
        Self { oracle, limits }
    }

    pub fn limits(&self) -> PayloadLimits {
        self.limits
    }

    /// Run every rule against `payload`.
    ///
    /// An empty result means the payload may proceed.
    pub fn validate(&self, payload: &CustomerPayload) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        self.check_name(
            &mut errors,
            fields::FIRST_NAME,
            "First name",
            Some(payload.first_name.as_str()),
            true,
        );
        self.check_name(
            &mut errors,
            fields::MIDDLE_NAME,
            "Middle name",
            payload.middle_name.as_deref(),
            false,
        );
        self.check_name(
            &mut errors,
            fields::LAST_NAME,
            "Last name",
            Some(payload.last_name.as_str()),
            true,
        );

        if payload.email_address.trim().is_empty() {
            errors.push(FieldError::new(
                fields::EMAIL_ADDRESS,
                "Email address is required",
            ));
        } else if !self.oracle.is_valid_email(&payload.email_address) {
            errors.push(FieldError::new(
                fields::EMAIL_ADDRESS,
                format!("Invalid email address: {}", payload.email_address),
            ));
        }

        if self.limits.require_phone_numbers && payload.phone_numbers.is_empty() {
            errors.push(FieldError::new(
                fields::PHONE_NUMBERS,
                "At least one phone number is required",
            ));
        }

        for (index, entry) in payload.phone_numbers.iter().enumerate() {
            errors.extend(self.validate_phone_entry(index, entry));
        }

        errors
    }

    /// Validate one phone entry, tagging failures with its position.
    pub fn validate_phone_entry(&self, index: usize, entry: &PhoneNumberPayload) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if entry.phone_number.trim().is_empty() {
            errors.push(FieldError::at(
                fields::PHONE_NUMBER,
                index,
                "Phone number is required",
            ));
        } else if !PHONE_NUMBER_PATTERN.is_match(&entry.phone_number) {
            errors.push(FieldError::at(
                fields::PHONE_NUMBER,
                index,
                PHONE_NUMBER_PATTERN_MESSAGE,
            ));
        } else if !self
            .oracle
            .is_valid_phone_number(&entry.phone_number, &entry.country_code)
        {
            errors.push(FieldError::at(
                fields::PHONE_NUMBER,
                index,
                format!("Invalid phone number: {}", entry.phone_number),
            ));
        }

        if let Err(e) = entry.phone_type.parse::<PhoneType>() {
            errors.push(FieldError::at(fields::PHONE_TYPE, index, e.to_string()));
        }

        if entry.country_code.trim().is_empty() {
            errors.push(FieldError::at(
                fields::COUNTRY_CODE,
                index,
                "Country code is required",
            ));
        } else if entry.country_code.chars().count() > self.limits.max_country_code_length {
            errors.push(FieldError::at(
                fields::COUNTRY_CODE,
                index,
                format!(
                    "Country code must not exceed {} characters",
                    self.limits.max_country_code_length
                ),
            ));
        }

        errors
    }

    /// Build phone number entities from validated entries.
    ///
    /// Construction re-checks type and number validity, so it can still fail;
    /// all failures are collected. Semantically equal entries collapse to the
    /// first occurrence.
    pub fn build_phone_numbers(
        &self,
        entries: &[PhoneNumberPayload],
    ) -> Result<Vec<PhoneNumber>, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut seen = HashSet::new();
        let mut phones = Vec::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            let phone_type = match entry.phone_type.parse::<PhoneType>() {
                Ok(phone_type) => phone_type,
                Err(e) => {
                    errors.push(FieldError::at(fields::PHONE_TYPE, index, e.to_string()));
                    continue;
                }
            };

            if !self
                .oracle
                .is_valid_phone_number(&entry.phone_number, &entry.country_code)
            {
                errors.push(FieldError::at(
                    fields::PHONE_NUMBER,
                    index,
                    format!("Invalid phone number: {}", entry.phone_number),
                ));
                continue;
            }

            let phone = PhoneNumber::new(
                entry.phone_number.clone(),
                phone_type,
                entry.country_code.clone(),
                entry.verified,
            );
            if seen.insert(phone.key()) {
                phones.push(phone);
            }
        }

        errors.into_result().map(|()| phones)
    }

    fn check_name(
        &self,
        errors: &mut ValidationErrors,
        field: &str,
        label: &str,
        value: Option<&str>,
        required: bool,
    ) {
        match value {
            Some(v) if v.trim().is_empty() => {
                if required {
                    errors.push(FieldError::new(field, format!("{} is required", label)));
                }
            }
            Some(v) if v.chars().count() > self.limits.max_name_length => {
                errors.push(FieldError::new(
                    field,
                    format!(
                        "{} must not exceed {} characters",
                        label, self.limits.max_name_length
                    ),
                ));
            }
            Some(_) => {}
            None => {
                if required {
                    errors.push(FieldError::new(field, format!("{} is required", label)));
                }
            }
        }
    }
}
