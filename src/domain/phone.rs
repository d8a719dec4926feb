//! Phone number normalization and the semantic comparison key.

use super::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonicalize a raw phone number for comparison.
///
/// Keeps ASCII digits and `+` characters, dropping spaces, dashes,
/// parentheses and every other symbol. Idempotent.
///
/// # Example
///
/// ```
/// use customer_registry::domain::normalize_phone_number;
///
/// assert_eq!(normalize_phone_number("+1 (212) 555-2368"), "+12125552368");
/// ```
pub fn normalize_phone_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Kind of phone line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PhoneType {
    Mobile,
    Home,
    Work,
}

impl PhoneType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "MOBILE",
            Self::Home => "HOME",
            Self::Work => "WORK",
        }
    }
}

impl FromStr for PhoneType {
    type Err = ValidationError;

    /// Exact, case-sensitive match on `MOBILE`, `HOME` or `WORK`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MOBILE" => Ok(Self::Mobile),
            "HOME" => Ok(Self::Home),
            "WORK" => Ok(Self::Work),
            other => Err(ValidationError::InvalidPhoneType(other.to_string())),
        }
    }
}

impl fmt::Display for PhoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The part of a phone number that decides semantic equality.
///
/// Two phone numbers are the same entry iff their keys are equal. The
/// verified flag and raw formatting are not part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhoneKey {
    pub normalized: String,
    pub phone_type: PhoneType,
    pub country_code: String,
}

impl PhoneKey {
    pub fn new(raw_number: &str, phone_type: PhoneType, country_code: &str) -> Self {
        Self {
            normalized: normalize_phone_number(raw_number),
            phone_type,
            country_code: country_code.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_formatting() {
        assert_eq!(normalize_phone_number("+1 212-555-2368"), "+12125552368");
        assert_eq!(normalize_phone_number("(212) 555.2368"), "2125552368");
        assert_eq!(normalize_phone_number("abc"), "");
        assert_eq!(normalize_phone_number(""), "");
    }

    #[test]
    fn test_normalize_keeps_embedded_plus() {
        assert_eq!(normalize_phone_number("1+2 3"), "1+23");
    }

    #[test]
    fn test_normalize_ignores_non_ascii_digits() {
        // Arabic-Indic digits are not ASCII digits
        assert_eq!(normalize_phone_number("٣4"), "4");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in [
            "+1 (212) 555-2368",
            "  +44 20 7946 0958 ext. 12",
            "++--..",
            "",
            "٣٣٣ 123",
        ] {
            let once = normalize_phone_number(raw);
            assert_eq!(normalize_phone_number(&once), once, "input: {:?}", raw);
        }
    }

    #[test]
    fn test_phone_type_parse() {
        assert_eq!("MOBILE".parse::<PhoneType>().unwrap(), PhoneType::Mobile);
        assert_eq!("HOME".parse::<PhoneType>().unwrap(), PhoneType::Home);
        assert_eq!("WORK".parse::<PhoneType>().unwrap(), PhoneType::Work);
        assert!("mobile".parse::<PhoneType>().is_err());
        assert!("FAX".parse::<PhoneType>().is_err());
    }

    #[test]
    fn test_phone_type_serialization() {
        let json = serde_json::to_string(&PhoneType::Work).unwrap();
        assert_eq!(json, "\"WORK\"");
        let parsed: PhoneType = serde_json::from_str("\"HOME\"").unwrap();
        assert_eq!(parsed, PhoneType::Home);
    }

    #[test]
    fn test_key_ignores_formatting_but_not_type_or_country() {
        let a = PhoneKey::new("+1 212 555 2368", PhoneType::Mobile, "US");
        let b = PhoneKey::new("+1-212-555-2368", PhoneType::Mobile, "US");
        let c = PhoneKey::new("+12125552368", PhoneType::Home, "US");
        let d = PhoneKey::new("+12125552368", PhoneType::Mobile, "CA");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }
}
