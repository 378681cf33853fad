//! Result type alias for the registry
//!
//! This module provides a convenient Result type alias that uses
//! `RegistryError` as the error type.

use super::errors::RegistryError;

/// Result type alias for registry operations
///
/// # Examples
///
/// ```
/// use patient_registry::domain::result::Result;
/// use patient_registry::domain::errors::RegistryError;
///
/// fn lookup() -> Result<String> {
///     Ok("P001".to_string())
/// }
///
/// fn failing_lookup() -> Result<()> {
///     Err(RegistryError::NotFound("Patient not found".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RegistryError;

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(RegistryError::AlreadyExists("P001".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
