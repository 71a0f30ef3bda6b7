//! Validation error types
//!
//! A failed record validation reports every offending field at once rather
//! than stopping at the first problem.

use std::fmt;

// ============================================================================
// Validation Result
// ============================================================================

/// Validation result type
pub type ValidationResult<T> = Result<T, ValidationErrors>;

// ============================================================================
// Validation Errors Collection
// ============================================================================

/// Collection of field errors raised while validating one record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    /// List of individual validation errors
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create a new empty validation errors collection
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Add a validation error to the collection
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Convert to Result - Ok(value) if no errors, Err if there are errors
    pub fn into_result<T>(self, value: T) -> ValidationResult<T> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    /// Get errors as a slice
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Names of the offending fields, in the order they were reported
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    /// True if `field` was reported as offending
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "; {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// Single Validation Error
// ============================================================================

/// A single field validation error
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Record kind being validated (e.g. "user", "time_log")
    pub location: String,

    /// Field name
    pub field: String,

    /// Human-readable error message
    pub message: String,

    /// Error type classification
    pub error_type: ErrorType,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(
        location: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
        error_type: ErrorType,
    ) -> Self {
        Self {
            location: location.into(),
            field: field.into(),
            message: message.into(),
            error_type,
        }
    }

    /// Create a type error
    pub fn type_error(location: &str, field: &str, expected: &str) -> Self {
        Self::new(
            location,
            field,
            format!("Expected {}", expected),
            ErrorType::TypeError,
        )
    }

    /// Create a format error
    pub fn format_error(location: &str, field: &str, message: impl Into<String>) -> Self {
        Self::new(location, field, message, ErrorType::FormatError)
    }

    /// Create a missing field error
    pub fn missing_error(location: &str, field: &str) -> Self {
        Self::new(location, field, "Field required", ErrorType::Missing)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}: {} [{}]",
            self.location, self.field, self.message, self.error_type
        )
    }
}

// ============================================================================
// Error Type Classification
// ============================================================================

/// Classification of validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// Type mismatch error (e.g., expected string, got integer)
    TypeError,

    /// Required field missing
    Missing,

    /// Invalid format (e.g., invalid email, malformed clock time)
    FormatError,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeError => write!(f, "type_error"),
            Self::Missing => write!(f, "missing"),
            Self::FormatError => write!(f, "format_error"),
        }
    }
}
