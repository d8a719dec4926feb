//! Configuration management for the customer registry.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is honored when present; dotenvy never writes to stdout, which
//! MCP uses for communication.

use crate::error::{ConfigError, ConfigResult};
use crate::validation::PayloadLimits;
use std::env;

/// Configuration for the customer registry server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level (default: "info")
    pub log_level: String,

    /// Maximum length of first, middle and last names (default: 255)
    pub max_name_length: usize,

    /// Maximum length of a phone number's country code (default: 10)
    pub max_country_code_length: usize,

    /// Whether a customer must carry at least one phone number (default: true)
    pub require_phone_numbers: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `MAX_NAME_LENGTH`: Max name length in characters (default: 255)
    /// - `MAX_COUNTRY_CODE_LENGTH`: Max country code length (default: 10)
    /// - `REQUIRE_PHONE_NUMBERS`: Reject customers without phones (default: true)
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let defaults = PayloadLimits::default();
        let max_name_length = Self::parse_env_usize("MAX_NAME_LENGTH", defaults.max_name_length)?;
        let max_country_code_length =
            Self::parse_env_usize("MAX_COUNTRY_CODE_LENGTH", defaults.max_country_code_length)?;
        let require_phone_numbers =
            Self::parse_env_bool("REQUIRE_PHONE_NUMBERS", defaults.require_phone_numbers)?;

        if max_name_length == 0 {
            return Err(ConfigError::InvalidValue {
                var: "MAX_NAME_LENGTH".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if max_country_code_length == 0 {
            return Err(ConfigError::InvalidValue {
                var: "MAX_COUNTRY_CODE_LENGTH".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            log_level,
            max_name_length,
            max_country_code_length,
            require_phone_numbers,
        })
    }

    /// Limits the field validator enforces.
    pub fn payload_limits(&self) -> PayloadLimits {
        PayloadLimits {
            max_name_length: self.max_name_length,
            max_country_code_length: self.max_country_code_length,
            require_phone_numbers: self.require_phone_numbers,
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as a boolean with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let limits = PayloadLimits::default();
        Config {
            log_level: "info".to_string(),
            max_name_length: limits.max_name_length,
            max_country_code_length: limits.max_country_code_length,
            require_phone_numbers: limits.require_phone_numbers,
        }
    }
}
