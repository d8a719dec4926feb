//! Email and phone number format predicates.

use once_cell::sync::Lazy;
use phonenumber::country;
use regex::Regex;

/// Source of truth for "is this well-formed".
///
/// Implementations must be deterministic: identical inputs, identical answers.
/// Neither check looks at stored data.
pub trait ValidationOracle: Send + Sync {
    /// Structural email validity (not uniqueness).
    fn is_valid_email(&self, email: &str) -> bool;

    /// Whether `raw_number` is a plausible number when dialled from `country_code`.
    ///
    /// Unparseable input is reported as invalid, never as an error.
    fn is_valid_phone_number(&self, raw_number: &str, country_code: &str) -> bool;
}

const MAX_EMAIL_LENGTH: usize = 254;
const MAX_LOCAL_PART_LENGTH: usize = 64;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
    )
    .expect("Failed to compile email regex")
});

/// Oracle backed by a structural email pattern and libphonenumber metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValidationOracle;

impl DefaultValidationOracle {
    pub fn new() -> Self {
        Self
    }

    /// Resolve an ISO region code; unknown regions yield `None`.
    fn region(country_code: &str) -> Option<country::Id> {
        country_code
            .trim()
            .to_ascii_uppercase()
            .parse::<country::Id>()
            .ok()
    }
}

impl ValidationOracle for DefaultValidationOracle {
    fn is_valid_email(&self, email: &str) -> bool {
        if email.len() > MAX_EMAIL_LENGTH || !EMAIL_REGEX.is_match(email) {
            return false;
        }

        // Dots may separate atoms of the local part but not lead, trail or repeat
        match email.rsplit_once('@') {
            Some((local, _)) => {
                local.len() <= MAX_LOCAL_PART_LENGTH
                    && !local.starts_with('.')
                    && !local.ends_with('.')
                    && !local.contains("..")
            }
            None => false,
        }
    }

    fn is_valid_phone_number(&self, raw_number: &str, country_code: &str) -> bool {
        match phonenumber::parse(Self::region(country_code), raw_number) {
            Ok(number) => number.is_valid(),
            Err(_) => false,
        }
    }
}
