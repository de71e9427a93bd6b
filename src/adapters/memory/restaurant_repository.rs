//! In-memory implementation of RestaurantRepository.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, PageRequest, RestaurantId};
use crate::domain::restaurant::Restaurant;
use crate::ports::{ListScope, RestaurantPage, RestaurantRepository};

/// In-memory restaurant store with the same search and ordering semantics
/// as the PostgreSQL adapter.
#[derive(Default)]
pub struct InMemoryRestaurantRepository {
    restaurants: Mutex<Vec<Restaurant>>,
}

impl InMemoryRestaurantRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.lock().unwrap().is_empty()
    }
}

fn matches_search(restaurant: &Restaurant, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    restaurant.name.to_lowercase().contains(&needle)
        || restaurant.city.to_lowercase().contains(&needle)
        || restaurant
            .categories
            .iter()
            .any(|c| c.to_lowercase().contains(&needle))
}

#[async_trait]
impl RestaurantRepository for InMemoryRestaurantRepository {
    async fn insert(&self, restaurant: &Restaurant) -> Result<(), DomainError> {
        self.restaurants.lock().unwrap().push(restaurant.clone());
        Ok(())
    }

    async fn update(&self, restaurant: &Restaurant) -> Result<(), DomainError> {
        let mut restaurants = self.restaurants.lock().unwrap();
        match restaurants.iter_mut().find(|r| r.id == restaurant.id) {
            Some(slot) => {
                *slot = restaurant.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::RestaurantNotFound,
                format!("Restaurant not found: {}", restaurant.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &RestaurantId) -> Result<Option<Restaurant>, DomainError> {
        Ok(self
            .restaurants
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == *id)
            .cloned())
    }

    async fn delete(&self, id: &RestaurantId) -> Result<(), DomainError> {
        let mut restaurants = self.restaurants.lock().unwrap();
        let before = restaurants.len();
        restaurants.retain(|r| r.id != *id);
        if restaurants.len() == before {
            return Err(DomainError::new(
                ErrorCode::RestaurantNotFound,
                format!("Restaurant not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn list(
        &self,
        scope: ListScope,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<RestaurantPage, DomainError> {
        let restaurants = self.restaurants.lock().unwrap();
        let mut matched: Vec<Restaurant> = restaurants
            .iter()
            .filter(|r| match scope {
                ListScope::Owner(owner_id) => r.owner_id == owner_id,
                ListScope::Public => true,
            })
            .filter(|r| search.map_or(true, |needle| matches_search(r, needle)))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matched.len() as u64;
        let window = matched
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect();

        Ok(RestaurantPage {
            restaurants: window,
            total,
        })
    }
}
