//! Restaurant use cases: create, update, delete, get, list.
//!
//! The write path composes four side-effecting collaborators (geocoder,
//! media store, ownership check, repository) into one operation. None of
//! the underlying calls are transactional; validation therefore runs before
//! any side effect, and partial upload failures log the orphaned keys for
//! out-of-band cleanup.

mod create;
mod delete;
mod queries;
mod update;

pub use create::{CreateRestaurantCommand, CreateRestaurantHandler};
pub use delete::{DeleteRestaurantCommand, DeleteRestaurantHandler};
pub use queries::{
    GetRestaurantHandler, GetRestaurantQuery, ListRestaurantsHandler, ListRestaurantsQuery,
    RestaurantListing,
};
pub use update::{UpdateRestaurantCommand, UpdateRestaurantHandler};

use uuid::Uuid;

use crate::domain::foundation::UserId;
use crate::domain::restaurant::{Restaurant, RestaurantError};
use crate::ports::{GeocodeError, MediaStore};

/// A restaurant record with its image keys rehydrated to signed URLs,
/// the only form in which listings leave the application layer.
#[derive(Debug, Clone)]
pub struct RestaurantView {
    pub restaurant: Restaurant,
    pub image_urls: Vec<String>,
}

/// Builds a collision-free storage key namespaced by owner.
pub(crate) fn new_image_key(owner_id: &UserId) -> String {
    format!("restaurants/{}/{}.jpg", owner_id, Uuid::new_v4())
}

/// Stores every image, fanning the uploads out concurrently.
///
/// On any failure the keys that did make it are logged as orphaned; there
/// is no compensating rollback.
pub(crate) async fn store_all(
    media: &dyn MediaStore,
    owner_id: &UserId,
    files: &[Vec<u8>],
) -> Result<Vec<String>, RestaurantError> {
    let keyed: Vec<(String, &[u8])> = files
        .iter()
        .map(|bytes| (new_image_key(owner_id), bytes.as_slice()))
        .collect();

    let results = futures::future::join_all(
        keyed
            .iter()
            .map(|(key, bytes)| async move { media.store(bytes, key).await.map(|_| key.clone()) }),
    )
    .await;

    let mut stored = Vec::with_capacity(results.len());
    let mut failure = None;
    for result in results {
        match result {
            Ok(key) => stored.push(key),
            Err(e) => failure = failure.or(Some(e)),
        }
    }

    match failure {
        None => Ok(stored),
        Some(err) => {
            if !stored.is_empty() {
                tracing::warn!(
                    orphaned_keys = ?stored,
                    "partial image upload failure left stored objects without an owning record"
                );
            }
            Err(RestaurantError::StorageFailed(err.to_string()))
        }
    }
}

/// Exchanges storage keys for signed URLs, concurrently.
pub(crate) async fn sign_all(
    media: &dyn MediaStore,
    keys: &[String],
) -> Result<Vec<String>, RestaurantError> {
    futures::future::try_join_all(keys.iter().map(|key| media.signed_url(key)))
        .await
        .map_err(|e| RestaurantError::StorageFailed(e.to_string()))
}

/// Rehydrates a record into its API-facing view.
pub(crate) async fn into_view(
    media: &dyn MediaStore,
    restaurant: Restaurant,
) -> Result<RestaurantView, RestaurantError> {
    let image_urls = sign_all(media, &restaurant.images).await?;
    Ok(RestaurantView {
        restaurant,
        image_urls,
    })
}

/// Translates geocoding failures into workflow errors, keeping the
/// client-correctable / server-fault split intact.
pub(crate) fn map_geocode_error(err: GeocodeError) -> RestaurantError {
    match err {
        GeocodeError::InvalidInput => RestaurantError::GeocodingFailed(err.to_string()),
        GeocodeError::Failed(reason) => RestaurantError::GeocodingFailed(reason),
        GeocodeError::Misconfigured => RestaurantError::GeocodingUnavailable(err.to_string()),
        GeocodeError::Transport(reason) => RestaurantError::GeocodingUnavailable(reason),
    }
}
