//! Google Maps implementation of the Geocoder port.
//!
//! Calls the Geocoding API with the joined `address, city, pin_code`
//! string. A non-`OK` status or an empty result set is a client-correctable
//! failure; transport and decode problems are provider faults.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::domain::restaurant::Coordinates;
use crate::ports::{GeocodeError, Geocoder};

/// Configuration for the Google geocoder.
#[derive(Debug, Clone)]
pub struct GoogleGeocoderConfig {
    /// API key; `None` leaves the adapter unconfigured and every call
    /// fails with `Misconfigured`.
    api_key: Option<Secret<String>>,
    /// Base URL for the API (default: https://maps.googleapis.com).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GoogleGeocoderConfig {
    pub fn new(api_key: Option<Secret<String>>) -> Self {
        Self {
            api_key,
            base_url: "https://maps.googleapis.com".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret().as_str())
    }
}

/// Google Maps geocoding adapter.
pub struct GoogleGeocoder {
    config: GoogleGeocoderConfig,
    client: Client,
}

impl GoogleGeocoder {
    pub fn new(config: GoogleGeocoderConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self { config, client }
    }

    fn geocode_url(&self) -> String {
        format!("{}/maps/api/geocode/json", self.config.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn geocode(
        &self,
        address: &str,
        city: &str,
        pin_code: &str,
    ) -> Result<Coordinates, GeocodeError> {
        if address.is_empty() || city.is_empty() || pin_code.is_empty() {
            return Err(GeocodeError::InvalidInput);
        }
        let api_key = self.config.api_key().ok_or(GeocodeError::Misconfigured)?;

        let full_address = format!("{}, {}, {}", address, city, pin_code);
        tracing::debug!(address = %full_address, "geocoding address");

        let response = self
            .client
            .get(self.geocode_url())
            .query(&[("address", full_address.as_str()), ("key", api_key)])
            .send()
            .await
            .map_err(|e| GeocodeError::Transport(e.to_string()))?;

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::Transport(e.to_string()))?;

        if body.status != "OK" {
            let reason = match &body.error_message {
                Some(detail) => format!("{} - {}", body.status, detail),
                None => body.status.clone(),
            };
            tracing::warn!(status = %body.status, address = %full_address, "geocoding provider rejected the address");
            return Err(GeocodeError::Failed(reason));
        }

        let location = body
            .results
            .first()
            .map(|r| &r.geometry.location)
            .ok_or_else(|| GeocodeError::Failed("No results found".to_string()))?;

        Coordinates::new(location.lat, location.lng).map_err(|_| {
            GeocodeError::Transport("provider returned out-of-range coordinates".to_string())
        })
    }
}
