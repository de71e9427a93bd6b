//! Error types shared across domain modules and ports.

use std::error::Error;
use std::fmt;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InsufficientImages,

    // Not found errors
    UserNotFound,
    RestaurantNotFound,

    // Authorization errors
    Unauthorized,
    Forbidden,
    InvalidCredentials,
    DuplicateEmail,

    // Dependency errors
    GeocodingFailed,
    GeocodingUnavailable,
    StorageWriteFailed,
    StorageReadFailed,
    StorageDeleteFailed,
    InvalidImageReference,

    // Infrastructure errors
    DatabaseError,
    ConfigError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InsufficientImages => "INSUFFICIENT_IMAGES",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::RestaurantNotFound => "RESTAURANT_NOT_FOUND",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::DuplicateEmail => "DUPLICATE_EMAIL",
            ErrorCode::GeocodingFailed => "GEOCODING_FAILED",
            ErrorCode::GeocodingUnavailable => "GEOCODING_UNAVAILABLE",
            ErrorCode::StorageWriteFailed => "STORAGE_WRITE_FAILED",
            ErrorCode::StorageReadFailed => "STORAGE_READ_FAILED",
            ErrorCode::StorageDeleteFailed => "STORAGE_DELETE_FAILED",
            ErrorCode::InvalidImageReference => "INVALID_IMAGE_REFERENCE",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code and message, returned by ports.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

/// A single field-level validation problem.
///
/// Collected into lists so the API can report every invalid field at once.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::RestaurantNotFound, "Restaurant not found");
        assert_eq!(format!("{}", err), "[RESTAURANT_NOT_FOUND] Restaurant not found");
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::DuplicateEmail), "DUPLICATE_EMAIL");
        assert_eq!(format!("{}", ErrorCode::InternalError), "INTERNAL_ERROR");
    }

    #[test]
    fn field_issue_serializes_both_fields() {
        let issue = FieldIssue::new("pinCode", "must be 5 to 10 digits");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["field"], "pinCode");
        assert_eq!(json["message"], "must be 5 to 10 digits");
    }
}
