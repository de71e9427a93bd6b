//! Restaurant workflow errors.

use crate::domain::foundation::{DomainError, ErrorCode, FieldIssue, RestaurantId};

use super::MIN_IMAGES;

/// Errors produced by the restaurant write and read paths.
#[derive(Debug, Clone, PartialEq)]
pub enum RestaurantError {
    /// No listing with the requested id.
    NotFound(RestaurantId),
    /// Authenticated caller is not the owner.
    Forbidden,
    /// Listing would end up with fewer than the minimum gallery images.
    InsufficientImages { provided: usize },
    /// One or more fields failed validation.
    ValidationFailed(Vec<FieldIssue>),
    /// The address could not be resolved to coordinates (client-correctable).
    GeocodingFailed(String),
    /// The geocoding provider or its configuration is broken (server fault).
    GeocodingUnavailable(String),
    /// A previously-issued signed URL could not be mapped back to a key.
    InvalidImageReference(String),
    /// Object storage rejected a write, read or delete.
    StorageFailed(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl RestaurantError {
    pub fn not_found(id: RestaurantId) -> Self {
        RestaurantError::NotFound(id)
    }

    pub fn insufficient_images(provided: usize) -> Self {
        RestaurantError::InsufficientImages { provided }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        RestaurantError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            RestaurantError::NotFound(_) => ErrorCode::RestaurantNotFound,
            RestaurantError::Forbidden => ErrorCode::Forbidden,
            RestaurantError::InsufficientImages { .. } => ErrorCode::InsufficientImages,
            RestaurantError::ValidationFailed(_) => ErrorCode::ValidationFailed,
            RestaurantError::GeocodingFailed(_) => ErrorCode::GeocodingFailed,
            RestaurantError::GeocodingUnavailable(_) => ErrorCode::GeocodingUnavailable,
            RestaurantError::InvalidImageReference(_) => ErrorCode::InvalidImageReference,
            RestaurantError::StorageFailed(_) => ErrorCode::StorageWriteFailed,
            RestaurantError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            RestaurantError::NotFound(id) => format!("Restaurant not found: {}", id),
            RestaurantError::Forbidden => "Permission denied".to_string(),
            RestaurantError::InsufficientImages { provided } => format!(
                "At least {} images are required, got {}",
                MIN_IMAGES, provided
            ),
            RestaurantError::ValidationFailed(_) => "Invalid input".to_string(),
            RestaurantError::GeocodingFailed(reason) => format!("Geocoding failed: {}", reason),
            RestaurantError::GeocodingUnavailable(reason) => {
                format!("Geocoding unavailable: {}", reason)
            }
            RestaurantError::InvalidImageReference(url) => {
                format!("Unrecognized image reference: {}", url)
            }
            RestaurantError::StorageFailed(reason) => format!("Image storage error: {}", reason),
            RestaurantError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for RestaurantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RestaurantError {}

impl From<DomainError> for RestaurantError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => RestaurantError::Forbidden,
            ErrorCode::StorageWriteFailed
            | ErrorCode::StorageReadFailed
            | ErrorCode::StorageDeleteFailed => RestaurantError::StorageFailed(err.message),
            _ => RestaurantError::Infrastructure(err.to_string()),
        }
    }
}
