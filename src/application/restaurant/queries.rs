//! Read-path handlers: get one listing, list with pagination and search.

use std::sync::Arc;

use crate::domain::foundation::{PageInfo, PageRequest, RestaurantId};
use crate::domain::restaurant::RestaurantError;
use crate::ports::{ListScope, MediaStore, RestaurantRepository};

use super::{into_view, RestaurantView};

/// Query for a single listing.
#[derive(Debug, Clone)]
pub struct GetRestaurantQuery {
    pub restaurant_id: RestaurantId,
}

/// Handler for fetching one listing.
pub struct GetRestaurantHandler {
    restaurants: Arc<dyn RestaurantRepository>,
    media: Arc<dyn MediaStore>,
}

impl GetRestaurantHandler {
    pub fn new(restaurants: Arc<dyn RestaurantRepository>, media: Arc<dyn MediaStore>) -> Self {
        Self { restaurants, media }
    }

    pub async fn handle(&self, query: GetRestaurantQuery) -> Result<RestaurantView, RestaurantError> {
        let restaurant = self
            .restaurants
            .find_by_id(&query.restaurant_id)
            .await?
            .ok_or(RestaurantError::NotFound(query.restaurant_id))?;
        into_view(self.media.as_ref(), restaurant).await
    }
}

/// Query for a page of listings.
#[derive(Debug, Clone)]
pub struct ListRestaurantsQuery {
    pub scope: ListScope,
    pub page: PageRequest,
    /// Case-insensitive substring over name, categories and city.
    pub search: Option<String>,
}

/// One page of listings with pagination metadata.
#[derive(Debug, Clone)]
pub struct RestaurantListing {
    pub items: Vec<RestaurantView>,
    pub pagination: PageInfo,
}

/// Handler for listing pages, owner-scoped or public.
pub struct ListRestaurantsHandler {
    restaurants: Arc<dyn RestaurantRepository>,
    media: Arc<dyn MediaStore>,
}

impl ListRestaurantsHandler {
    pub fn new(restaurants: Arc<dyn RestaurantRepository>, media: Arc<dyn MediaStore>) -> Self {
        Self { restaurants, media }
    }

    pub async fn handle(
        &self,
        query: ListRestaurantsQuery,
    ) -> Result<RestaurantListing, RestaurantError> {
        let page = self
            .restaurants
            .list(query.scope, query.page, query.search.as_deref())
            .await?;

        let items = futures::future::try_join_all(
            page.restaurants
                .into_iter()
                .map(|restaurant| into_view(self.media.as_ref(), restaurant)),
        )
        .await?;

        Ok(RestaurantListing {
            items,
            pagination: PageInfo::new(query.page, page.total),
        })
    }
}
