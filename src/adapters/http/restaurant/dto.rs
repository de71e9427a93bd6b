//! HTTP DTOs for the restaurant endpoints.
//!
//! Wire fields are camelCase to match the public API contract.

use serde::{Deserialize, Serialize};

use crate::application::restaurant::{RestaurantListing, RestaurantView};
use crate::domain::foundation::PageInfo;

/// Query parameters for the list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ListRestaurantsParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub search: Option<String>,
    /// Restrict to the caller's own listings (requires authentication).
    #[serde(default)]
    pub mine: bool,
}

/// A restaurant as exposed over the API. `images` holds signed URLs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantResponse {
    pub id: String,
    pub name: String,
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub address: String,
    pub city: String,
    pub pin_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub opening_time: String,
    pub closing_time: String,
    pub images: Vec<String>,
    pub offers_delivery: bool,
    pub offers_dine_in: bool,
    pub offers_pickup: bool,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<RestaurantView> for RestaurantResponse {
    fn from(view: RestaurantView) -> Self {
        let r = view.restaurant;
        Self {
            id: r.id.to_string(),
            name: r.name,
            categories: r.categories,
            description: r.description,
            address: r.address,
            city: r.city,
            pin_code: r.pin_code,
            latitude: r.coordinates.latitude(),
            longitude: r.coordinates.longitude(),
            phone_number: r.phone_number,
            website: r.website,
            opening_time: r.opening_time,
            closing_time: r.closing_time,
            images: view.image_urls,
            offers_delivery: r.offers_delivery,
            offers_dine_in: r.offers_dine_in,
            offers_pickup: r.offers_pickup,
            user_id: r.owner_id.to_string(),
            created_at: r.created_at.to_rfc3339(),
            updated_at: r.updated_at.to_rfc3339(),
        }
    }
}

/// Response for the single-listing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantEnvelope {
    pub restaurant: RestaurantResponse,
}

/// Response for write operations.
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantCommandResponse {
    pub message: String,
    pub restaurant: RestaurantResponse,
}

/// Bare message response (delete).
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Paginated list response.
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantListResponse {
    pub restaurants: Vec<RestaurantResponse>,
    pub pagination: PageInfo,
}

impl From<RestaurantListing> for RestaurantListResponse {
    fn from(listing: RestaurantListing) -> Self {
        Self {
            restaurants: listing.items.into_iter().map(Into::into).collect(),
            pagination: listing.pagination,
        }
    }
}
