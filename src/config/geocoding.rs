//! Geocoding provider configuration

use secrecy::Secret;
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Geocoding configuration (Google Maps)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GeocodingConfig {
    /// Google Maps API key. When unset, geocoding calls fail at runtime
    /// with a provider-configuration error.
    pub google_maps_api_key: Option<Secret<String>>,
}

impl GeocodingConfig {
    /// Validate geocoding configuration
    ///
    /// Development tolerates a missing key (client-supplied coordinates
    /// still work); production requires one.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if *environment == Environment::Production && self.google_maps_api_key.is_none() {
            return Err(ValidationError::MissingRequired("GOOGLE_MAPS_API_KEY"));
        }
        Ok(())
    }
}
