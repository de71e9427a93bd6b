//! Geographic coordinates value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::FieldIssue;

/// A validated latitude/longitude pair.
///
/// Construction enforces latitude ∈ [-90, 90] and longitude ∈ [-180, 180];
/// a `Coordinates` value in hand is always in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, Vec<FieldIssue>> {
        let mut issues = Vec::new();
        if !(-90.0..=90.0).contains(&latitude) || latitude.is_nan() {
            issues.push(FieldIssue::new("latitude", "must be between -90 and 90"));
        }
        if !(-180.0..=180.0).contains(&longitude) || longitude.is_nan() {
            issues.push(FieldIssue::new("longitude", "must be between -180 and 180"));
        }
        if issues.is_empty() {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(issues)
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}
