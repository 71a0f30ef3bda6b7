//! Input guards applied at the client boundary
//!
//! Collection names are checked before any store round-trip so a malformed
//! name fails the same way against every store.

use tms_common::{Result, TmsError};
use tracing::warn;

/// Maximum allowed length for collection names (MongoDB limit is 255, we're more conservative)
const MAX_COLLECTION_NAME_LENGTH: usize = 120;

/// Validated collection name
///
/// # Guarantees
/// - Not empty
/// - Maximum 120 characters
/// - No null bytes
/// - No "system." prefix (system collections)
/// - No $ characters (special operators)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCollectionName {
    name: String,
}

impl ValidatedCollectionName {
    /// Creates a new validated collection name
    ///
    /// # Errors
    /// Returns `Validation` if any guarantee above does not hold.
    pub fn new(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(TmsError::Validation(
                "Collection name cannot be empty".to_string(),
            ));
        }

        if name.len() > MAX_COLLECTION_NAME_LENGTH {
            return Err(TmsError::Validation(format!(
                "Collection name exceeds maximum length of {} characters: '{}'",
                MAX_COLLECTION_NAME_LENGTH, name
            )));
        }

        if name.contains('\0') {
            return Err(TmsError::Validation(
                "Collection name cannot contain null bytes".to_string(),
            ));
        }

        if name.starts_with("system.") {
            return Err(TmsError::Validation(format!(
                "Collection name cannot start with 'system.' (reserved): '{}'",
                name
            )));
        }

        if name.contains('$') {
            return Err(TmsError::Validation(format!(
                "Collection name cannot contain '$' character: '{}'",
                name
            )));
        }

        // Allowed, but usually a typo
        if name.contains("..") || name.contains("//") {
            warn!("Collection name contains suspicious pattern: '{}'", name);
        }

        Ok(ValidatedCollectionName {
            name: name.to_string(),
        })
    }

    /// Returns the validated collection name as a string slice
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl AsRef<str> for ValidatedCollectionName {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for ValidatedCollectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_collection_names() {
        assert!(ValidatedCollectionName::new("users").is_ok());
        assert!(ValidatedCollectionName::new("time_logs").is_ok());
        assert!(ValidatedCollectionName::new("archive.2025").is_ok());
    }

    #[test]
    fn test_empty_collection_name() {
        let result = ValidatedCollectionName::new("");
        assert!(matches!(result, Err(TmsError::Validation(_))));
    }

    #[test]
    fn test_collection_name_too_long() {
        let long_name = "a".repeat(MAX_COLLECTION_NAME_LENGTH + 1);
        assert!(ValidatedCollectionName::new(&long_name).is_err());
    }

    #[test]
    fn test_collection_name_null_byte() {
        assert!(ValidatedCollectionName::new("users\0").is_err());
    }

    #[test]
    fn test_system_collection_name() {
        assert!(ValidatedCollectionName::new("system.users").is_err());
    }

    #[test]
    fn test_collection_name_with_dollar() {
        assert!(ValidatedCollectionName::new("users$where").is_err());
    }

    #[test]
    fn test_display_and_as_ref() {
        let name = ValidatedCollectionName::new("users").unwrap();
        assert_eq!(name.to_string(), "users");
        assert_eq!(name.as_ref(), "users");
        assert_eq!(name.as_str(), "users");
    }
}
