//! CreateRestaurantHandler - Command handler for creating a listing.

use std::sync::Arc;

use crate::domain::foundation::{RestaurantId, Timestamp, UserId};
use crate::domain::restaurant::{
    Coordinates, Restaurant, RestaurantDraft, RestaurantError, MIN_IMAGES,
};
use crate::ports::{Geocoder, MediaStore, RestaurantRepository};

use super::{into_view, map_geocode_error, store_all, RestaurantView};

/// Command to create a listing.
#[derive(Debug, Clone)]
pub struct CreateRestaurantCommand {
    pub owner_id: UserId,
    pub draft: RestaurantDraft,
    /// Raw image file contents; at least [`MIN_IMAGES`] are required.
    pub images: Vec<Vec<u8>>,
}

/// Handler for listing creation.
///
/// Coordinate precedence: a client-supplied pair wins when present and in
/// bounds; otherwise the address is geocoded. Validation runs before any
/// side effect.
pub struct CreateRestaurantHandler {
    restaurants: Arc<dyn RestaurantRepository>,
    geocoder: Arc<dyn Geocoder>,
    media: Arc<dyn MediaStore>,
}

impl CreateRestaurantHandler {
    pub fn new(
        restaurants: Arc<dyn RestaurantRepository>,
        geocoder: Arc<dyn Geocoder>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            restaurants,
            geocoder,
            media,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateRestaurantCommand,
    ) -> Result<RestaurantView, RestaurantError> {
        // 1. Image floor and field validation, before any side effect
        if cmd.images.len() < MIN_IMAGES {
            return Err(RestaurantError::insufficient_images(cmd.images.len()));
        }
        cmd.draft.validate()?;

        // 2. Resolve coordinates: client pair wins, otherwise geocode
        let coordinates = match cmd.draft.coordinates {
            Some((lat, lng)) => {
                Coordinates::new(lat, lng).map_err(RestaurantError::ValidationFailed)?
            }
            None => self
                .geocoder
                .geocode(&cmd.draft.address, &cmd.draft.city, &cmd.draft.pin_code)
                .await
                .map_err(map_geocode_error)?,
        };

        // 3. Store images concurrently under owner-namespaced keys
        let image_keys = store_all(self.media.as_ref(), &cmd.owner_id, &cmd.images).await?;

        // 4. Persist
        let now = Timestamp::now();
        let draft = cmd.draft;
        let restaurant = Restaurant {
            id: RestaurantId::new(),
            name: draft.name,
            categories: draft.categories,
            description: draft.description,
            address: draft.address,
            city: draft.city,
            pin_code: draft.pin_code,
            coordinates,
            phone_number: draft.phone_number,
            website: draft.website,
            opening_time: draft.opening_time,
            closing_time: draft.closing_time,
            images: image_keys,
            offers_delivery: draft.offers_delivery,
            offers_dine_in: draft.offers_dine_in,
            offers_pickup: draft.offers_pickup,
            owner_id: cmd.owner_id,
            created_at: now,
            updated_at: now,
        };
        self.restaurants.insert(&restaurant).await?;

        // 5. Rehydrate keys to signed URLs
        into_view(self.media.as_ref(), restaurant).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        FixedGeocoder, InMemoryMediaStore, InMemoryRestaurantRepository,
    };
    use crate::ports::{GeocodeError, RestaurantRepository as _};

    fn valid_draft() -> RestaurantDraft {
        RestaurantDraft {
            name: "Masala House".to_string(),
            categories: vec!["Indian".to_string()],
            description: None,
            address: "12 Gandhi Road".to_string(),
            city: "Pune".to_string(),
            pin_code: "411001".to_string(),
            coordinates: None,
            phone_number: "9876543210".to_string(),
            website: None,
            opening_time: "09:00".to_string(),
            closing_time: "22:30".to_string(),
            offers_delivery: true,
            offers_dine_in: true,
            offers_pickup: false,
        }
    }

    fn three_images() -> Vec<Vec<u8>> {
        vec![vec![1], vec![2], vec![3]]
    }

    struct Fixture {
        restaurants: Arc<InMemoryRestaurantRepository>,
        geocoder: Arc<FixedGeocoder>,
        media: Arc<InMemoryMediaStore>,
        handler: CreateRestaurantHandler,
    }

    fn fixture() -> Fixture {
        let restaurants = Arc::new(InMemoryRestaurantRepository::new());
        let geocoder = Arc::new(FixedGeocoder::new(18.52, 73.85));
        let media = Arc::new(InMemoryMediaStore::new());
        let handler = CreateRestaurantHandler::new(
            restaurants.clone(),
            geocoder.clone(),
            media.clone(),
        );
        Fixture {
            restaurants,
            geocoder,
            media,
            handler,
        }
    }

    #[tokio::test]
    async fn creates_listing_with_geocoded_coordinates() {
        let fx = fixture();
        let view = fx
            .handler
            .handle(CreateRestaurantCommand {
                owner_id: UserId::new(),
                draft: valid_draft(),
                images: three_images(),
            })
            .await
            .unwrap();

        assert_eq!(view.restaurant.coordinates.latitude(), 18.52);
        assert_eq!(view.restaurant.images.len(), 3);
        assert_eq!(view.image_urls.len(), 3);
        assert_eq!(fx.geocoder.call_count(), 1);

        // Persisted, and exposed images are signed URLs, not raw keys.
        let stored = fx
            .restaurants
            .find_by_id(&view.restaurant.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.images, view.restaurant.images);
        for (key, url) in stored.images.iter().zip(&view.image_urls) {
            assert_ne!(key, url);
            assert!(url.contains(key.as_str()));
        }
    }

    #[tokio::test]
    async fn client_supplied_coordinates_skip_geocoding() {
        let fx = fixture();
        let mut draft = valid_draft();
        draft.coordinates = Some((51.5, -0.12));

        let view = fx
            .handler
            .handle(CreateRestaurantCommand {
                owner_id: UserId::new(),
                draft,
                images: three_images(),
            })
            .await
            .unwrap();

        assert_eq!(view.restaurant.coordinates.latitude(), 51.5);
        assert_eq!(fx.geocoder.call_count(), 0);
    }

    #[tokio::test]
    async fn fewer_than_three_images_fails_before_any_side_effect() {
        let fx = fixture();
        let result = fx
            .handler
            .handle(CreateRestaurantCommand {
                owner_id: UserId::new(),
                draft: valid_draft(),
                images: vec![vec![1], vec![2]],
            })
            .await;

        assert_eq!(
            result.unwrap_err(),
            RestaurantError::InsufficientImages { provided: 2 }
        );
        assert_eq!(fx.geocoder.call_count(), 0);
        assert!(fx.media.stored_keys().is_empty());
    }

    #[tokio::test]
    async fn unresolvable_address_fails_without_storing_images() {
        let restaurants = Arc::new(InMemoryRestaurantRepository::new());
        let media = Arc::new(InMemoryMediaStore::new());
        let handler = CreateRestaurantHandler::new(
            restaurants,
            Arc::new(FixedGeocoder::failing(GeocodeError::Failed(
                "ZERO_RESULTS".to_string(),
            ))),
            media.clone(),
        );

        let result = handler
            .handle(CreateRestaurantCommand {
                owner_id: UserId::new(),
                draft: valid_draft(),
                images: three_images(),
            })
            .await;

        assert!(matches!(result, Err(RestaurantError::GeocodingFailed(_))));
        assert!(media.stored_keys().is_empty());
    }

    #[tokio::test]
    async fn upload_failure_is_a_storage_error_and_nothing_is_persisted() {
        let restaurants = Arc::new(InMemoryRestaurantRepository::new());
        let media = Arc::new(InMemoryMediaStore::new().with_failing_writes());
        let handler = CreateRestaurantHandler::new(
            restaurants.clone(),
            Arc::new(FixedGeocoder::new(18.52, 73.85)),
            media,
        );

        let result = handler
            .handle(CreateRestaurantCommand {
                owner_id: UserId::new(),
                draft: valid_draft(),
                images: three_images(),
            })
            .await;

        assert!(matches!(result, Err(RestaurantError::StorageFailed(_))));
        assert!(restaurants.is_empty());
    }
}
