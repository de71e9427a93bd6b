//! Restaurant entity and write-path input types.

use crate::domain::foundation::{FieldIssue, RestaurantId, Timestamp, UserId};

use super::validation::{
    check_address, check_categories, check_city, check_name, check_phone_number, check_pin_code,
    check_time, check_website,
};
use super::{Coordinates, RestaurantError};

/// A restaurant listing.
///
/// `images` holds raw storage keys; they are exchanged for time-limited
/// signed URLs at the workflow boundary and never exposed directly.
/// `owner_id` is immutable after creation; only the owner may mutate or
/// delete the record.
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub categories: Vec<String>,
    pub description: Option<String>,
    pub address: String,
    pub city: String,
    pub pin_code: String,
    pub coordinates: Coordinates,
    pub phone_number: String,
    pub website: Option<String>,
    pub opening_time: String,
    pub closing_time: String,
    pub images: Vec<String>,
    pub offers_delivery: bool,
    pub offers_dine_in: bool,
    pub offers_pickup: bool,
    pub owner_id: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Restaurant {
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.owner_id == *user_id
    }
}

/// Fully-typed input for creating a listing.
///
/// `coordinates` carries the client-supplied raw pair when the request
/// included one; bounds are checked during [`RestaurantDraft::validate`].
/// When absent, the workflow geocodes from address/city/pin code.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantDraft {
    pub name: String,
    pub categories: Vec<String>,
    pub description: Option<String>,
    pub address: String,
    pub city: String,
    pub pin_code: String,
    pub coordinates: Option<(f64, f64)>,
    pub phone_number: String,
    pub website: Option<String>,
    pub opening_time: String,
    pub closing_time: String,
    pub offers_delivery: bool,
    pub offers_dine_in: bool,
    pub offers_pickup: bool,
}

impl RestaurantDraft {
    /// Checks every field rule, accumulating all problems into one error.
    pub fn validate(&self) -> Result<(), RestaurantError> {
        let mut issues = Vec::new();
        check_name(&mut issues, &self.name);
        check_categories(&mut issues, &self.categories);
        check_address(&mut issues, &self.address);
        check_city(&mut issues, &self.city);
        check_pin_code(&mut issues, &self.pin_code);
        check_phone_number(&mut issues, &self.phone_number);
        check_time(&mut issues, "openingTime", &self.opening_time);
        check_time(&mut issues, "closingTime", &self.closing_time);
        if let Some(website) = &self.website {
            check_website(&mut issues, website);
        }
        if let Some((lat, lng)) = self.coordinates {
            collect_coordinate_issues(&mut issues, lat, lng);
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(RestaurantError::ValidationFailed(issues))
        }
    }
}

/// Partial update for a listing; `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantPatch {
    pub name: Option<String>,
    pub categories: Option<Vec<String>>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub pin_code: Option<String>,
    pub coordinates: Option<(f64, f64)>,
    pub phone_number: Option<String>,
    pub website: Option<String>,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    pub offers_delivery: Option<bool>,
    pub offers_dine_in: Option<bool>,
    pub offers_pickup: Option<bool>,
}

impl RestaurantPatch {
    /// Validates the fields that are present.
    pub fn validate(&self) -> Result<(), RestaurantError> {
        let mut issues = Vec::new();
        if let Some(name) = &self.name {
            check_name(&mut issues, name);
        }
        if let Some(categories) = &self.categories {
            check_categories(&mut issues, categories);
        }
        if let Some(address) = &self.address {
            check_address(&mut issues, address);
        }
        if let Some(city) = &self.city {
            check_city(&mut issues, city);
        }
        if let Some(pin_code) = &self.pin_code {
            check_pin_code(&mut issues, pin_code);
        }
        if let Some(phone) = &self.phone_number {
            check_phone_number(&mut issues, phone);
        }
        if let Some(opening) = &self.opening_time {
            check_time(&mut issues, "openingTime", opening);
        }
        if let Some(closing) = &self.closing_time {
            check_time(&mut issues, "closingTime", closing);
        }
        if let Some(website) = &self.website {
            check_website(&mut issues, website);
        }
        if let Some((lat, lng)) = self.coordinates {
            collect_coordinate_issues(&mut issues, lat, lng);
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(RestaurantError::ValidationFailed(issues))
        }
    }

    /// True when the patch moves the listing's postal location, which
    /// obsoletes the stored coordinates.
    pub fn changes_location(&self, existing: &Restaurant) -> bool {
        let field_changed = |patch: &Option<String>, current: &str| {
            patch.as_deref().is_some_and(|v| v != current)
        };
        field_changed(&self.address, &existing.address)
            || field_changed(&self.city, &existing.city)
            || field_changed(&self.pin_code, &existing.pin_code)
    }

    /// Merges the patch over an existing record, leaving images and
    /// coordinates to the workflow (they follow their own rules).
    pub fn apply_to(&self, existing: &Restaurant) -> Restaurant {
        let mut updated = existing.clone();
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(categories) = &self.categories {
            updated.categories = categories.clone();
        }
        if let Some(description) = &self.description {
            updated.description = Some(description.clone());
        }
        if let Some(address) = &self.address {
            updated.address = address.clone();
        }
        if let Some(city) = &self.city {
            updated.city = city.clone();
        }
        if let Some(pin_code) = &self.pin_code {
            updated.pin_code = pin_code.clone();
        }
        if let Some(phone) = &self.phone_number {
            updated.phone_number = phone.clone();
        }
        if let Some(website) = &self.website {
            updated.website = Some(website.clone());
        }
        if let Some(opening) = &self.opening_time {
            updated.opening_time = opening.clone();
        }
        if let Some(closing) = &self.closing_time {
            updated.closing_time = closing.clone();
        }
        if let Some(delivery) = self.offers_delivery {
            updated.offers_delivery = delivery;
        }
        if let Some(dine_in) = self.offers_dine_in {
            updated.offers_dine_in = dine_in;
        }
        if let Some(pickup) = self.offers_pickup {
            updated.offers_pickup = pickup;
        }
        updated
    }
}

fn collect_coordinate_issues(issues: &mut Vec<FieldIssue>, lat: f64, lng: f64) {
    if let Err(coordinate_issues) = Coordinates::new(lat, lng) {
        issues.extend(coordinate_issues);
    }
}
