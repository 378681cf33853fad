//! Domain error types
//!
//! This module defines the error hierarchy for the registry. All errors are
//! domain-specific and don't expose third-party types.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Main registry error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A candidate record failed one or more field constraints
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A query parameter was outside its allowed set
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// No record exists under the requested id
    #[error("Not found: {0}")]
    NotFound(String),

    /// A record already exists under the id being created
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Persistence store read/write failures
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// The constraint a field value broke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationRule {
    /// Field absent or `null`
    Missing,
    /// JSON type did not match the field type
    WrongType,
    /// String was empty after trimming
    Blank,
    /// Numeric value outside its allowed range
    OutOfRange,
    /// Value not one of the enumerated options
    NotInEnumeration,
}

impl fmt::Display for ViolationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ViolationRule::Missing => "missing",
            ViolationRule::WrongType => "wrong_type",
            ViolationRule::Blank => "blank",
            ViolationRule::OutOfRange => "out_of_range",
            ViolationRule::NotInEnumeration => "not_in_enumeration",
        };
        f.write_str(s)
    }
}

/// A single field-level constraint violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Name of the offending field
    pub field: &'static str,

    /// Which rule was broken
    pub rule: ViolationRule,

    /// Human-readable description
    pub message: String,
}

impl FieldViolation {
    /// Creates a new violation
    pub fn new(field: &'static str, rule: ViolationRule, message: impl Into<String>) -> Self {
        Self {
            field,
            rule,
            message: message.into(),
        }
    }

    /// Shorthand for a missing field
    pub fn missing(field: &'static str) -> Self {
        Self::new(field, ViolationRule::Missing, format!("{field} is required"))
    }

    /// Shorthand for a JSON type mismatch
    pub fn wrong_type(field: &'static str, expected: &str) -> Self {
        Self::new(
            field,
            ViolationRule::WrongType,
            format!("{field} must be {expected}"),
        )
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.field, self.rule, self.message)
    }
}

/// Every violation found while validating one candidate record
///
/// Validation is batched, so a record with three bad fields yields one
/// `ValidationError` carrying three [`FieldViolation`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Wraps a non-empty list of violations
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// The individual violations, in field order
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Returns true if any violation concerns `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// Returns the rule broken by `field`, if any
    pub fn rule_for(&self, field: &str) -> Option<ViolationRule> {
        self.violations
            .iter()
            .find(|v| v.field == field)
            .map(|v| v.rule)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.violations.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

// Conversion from std::io::Error
impl From<std::io::Error> for RegistryError {
    fn from(err: std::io::Error) -> Self {
        RegistryError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        RegistryError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RegistryError {
    fn from(err: toml::de::Error) -> Self {
        RegistryError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::NotFound("Patient not found".to_string());
        assert_eq!(err.to_string(), "Not found: Patient not found");
    }

    #[test]
    fn test_validation_error_conversion() {
        let err = ValidationError::new(vec![FieldViolation::missing("name")]);
        let registry_err: RegistryError = err.into();
        assert!(matches!(registry_err, RegistryError::Validation(_)));
    }

    #[test]
    fn test_validation_error_display_joins_violations() {
        let err = ValidationError::new(vec![
            FieldViolation::missing("name"),
            FieldViolation::wrong_type("age", "an integer"),
        ]);
        assert_eq!(
            err.to_string(),
            "name (missing): name is required; age (wrong_type): age must be an integer"
        );
    }

    #[test]
    fn test_validation_error_lookup() {
        let err = ValidationError::new(vec![FieldViolation::new(
            "height",
            ViolationRule::OutOfRange,
            "height must be greater than 0",
        )]);
        assert!(err.has_field("height"));
        assert!(!err.has_field("weight"));
        assert_eq!(err.rule_for("height"), Some(ViolationRule::OutOfRange));
        assert_eq!(err.rule_for("weight"), None);
    }

    #[test]
    fn test_violation_rule_serializes_snake_case() {
        let json = serde_json::to_value(FieldViolation::missing("city")).unwrap();
        assert_eq!(json["rule"], "missing");
        assert_eq!(json["field"], "city");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: RegistryError = io_err.into();
        assert!(matches!(err, RegistryError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: RegistryError = json_err.into();
        assert!(matches!(err, RegistryError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: RegistryError = toml_err.into();
        assert!(matches!(err, RegistryError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_registry_error_implements_std_error() {
        let err = RegistryError::Storage("disk full".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
