//! Domain validation errors.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Errors that can occur during domain value object construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided ID is empty or not a UUID.
    InvalidId(String),

    /// The provided phone type is not one of MOBILE, HOME, WORK.
    InvalidPhoneType(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId(id) => write!(f, "Invalid identifier: {}", id),
            Self::InvalidPhoneType(kind) => {
                write!(f, "Type must be one of MOBILE, HOME, or WORK, got: {}", kind)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// A single field-level failure.
///
/// `index` is set for failures that belong to one entry of the phone list,
/// so several failing entries stay individually reportable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            index: None,
            message: message.into(),
        }
    }

    pub fn at(field: impl Into<String>, index: usize, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            index: Some(index),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]: {}", self.field, index, self.message),
            None => write!(f, "{}: {}", self.field, self.message),
        }
    }
}

/// Every field failure found in one validation pass, in discovery order.
///
/// An empty collection means the payload passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Whether any failure was recorded under `field`.
    pub fn contains_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Failures recorded against the phone entry at `index`.
    pub fn for_index(&self, index: usize) -> Vec<&FieldError> {
        self.0.iter().filter(|e| e.index == Some(index)).collect()
    }

    /// Collapse into the legacy `{field -> message}` shape.
    ///
    /// Later failures for the same field overwrite earlier ones.
    pub fn to_flat_map(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|e| (e.field.clone(), e.message.clone()))
            .collect()
    }

    /// Ok when empty, otherwise the collected failures.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("; "))
    }
}
