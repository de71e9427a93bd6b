//! Geocoding adapters.

mod google;

pub use google::{GoogleGeocoder, GoogleGeocoderConfig};
