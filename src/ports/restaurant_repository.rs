//! Restaurant repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PageRequest, RestaurantId, UserId};
use crate::domain::restaurant::Restaurant;

/// Whose listings a list query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Only the given owner's listings.
    Owner(UserId),
    /// Every listing, newest first.
    Public,
}

/// One page of listings plus the total match count (pre-pagination).
#[derive(Debug, Clone)]
pub struct RestaurantPage {
    pub restaurants: Vec<Restaurant>,
    pub total: u64,
}

/// Repository port for restaurant listings.
///
/// Updates are full-row writes; concurrent updates to the same listing
/// resolve as last-write-wins.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Persist a new listing.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, restaurant: &Restaurant) -> Result<(), DomainError>;

    /// Replace an existing listing.
    ///
    /// # Errors
    ///
    /// - `RestaurantNotFound` if the listing doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, restaurant: &Restaurant) -> Result<(), DomainError>;

    /// Find a listing by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &RestaurantId) -> Result<Option<Restaurant>, DomainError>;

    /// Delete a listing.
    ///
    /// # Errors
    ///
    /// - `RestaurantNotFound` if the listing doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &RestaurantId) -> Result<(), DomainError>;

    /// Page through listings, newest first.
    ///
    /// `search` filters case-insensitively on substring matches across
    /// name, categories and city.
    async fn list(
        &self,
        scope: ListScope,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<RestaurantPage, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn restaurant_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn RestaurantRepository) {}
    }
}
