//! Fixed-response implementation of Geocoder.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::restaurant::Coordinates;
use crate::ports::{GeocodeError, Geocoder};

/// Geocoder that answers every resolvable request with the same pair (or a
/// canned failure) and counts how often it was consulted. The workflow
/// tests assert on when geocoding does and does not happen.
pub struct FixedGeocoder {
    response: Result<Coordinates, GeocodeError>,
    calls: AtomicUsize,
}

impl FixedGeocoder {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            response: Ok(Coordinates::new(latitude, longitude)
                .expect("fixed geocoder coordinates must be in bounds")),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: GeocodeError) -> Self {
        Self {
            response: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn geocode(
        &self,
        address: &str,
        city: &str,
        pin_code: &str,
    ) -> Result<Coordinates, GeocodeError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if address.is_empty() || city.is_empty() || pin_code.is_empty() {
            return Err(GeocodeError::InvalidInput);
        }
        self.response.clone()
    }
}
