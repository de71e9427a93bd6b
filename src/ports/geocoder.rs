//! Geocoding port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::restaurant::Coordinates;

/// Errors from address geocoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// One of the address components was empty.
    #[error("Address, city, and pin code are required")]
    InvalidInput,

    /// The adapter has no provider credentials.
    #[error("Geocoding provider is not configured")]
    Misconfigured,

    /// The provider answered but could not resolve the address. This is a
    /// client-correctable failure and must surface as a 400, not a 500.
    #[error("Geocoding failed: {0}")]
    Failed(String),

    /// The provider could not be reached or returned garbage.
    #[error("Geocoding provider error: {0}")]
    Transport(String),
}

/// Converts a postal address into coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve `address, city, pin_code` to a coordinate pair.
    async fn geocode(
        &self,
        address: &str,
        city: &str,
        pin_code: &str,
    ) -> Result<Coordinates, GeocodeError>;
}
