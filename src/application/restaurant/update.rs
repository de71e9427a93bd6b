//! UpdateRestaurantHandler - Command handler for partial listing updates.

use std::sync::Arc;

use crate::domain::foundation::{RestaurantId, Timestamp, UserId};
use crate::domain::restaurant::{Coordinates, RestaurantError, RestaurantPatch, MIN_IMAGES};
use crate::ports::{Geocoder, MediaStore, RestaurantRepository};

use super::{into_view, map_geocode_error, store_all, RestaurantView};

/// Command to update a listing. Only the owner may issue it.
#[derive(Debug, Clone)]
pub struct UpdateRestaurantCommand {
    pub restaurant_id: RestaurantId,
    pub owner_id: UserId,
    pub patch: RestaurantPatch,
    /// New image files to add to the gallery.
    pub new_images: Vec<Vec<u8>>,
    /// Signed URLs (previously issued by us) of images to keep.
    pub images_to_keep: Option<Vec<String>>,
    /// Signed URLs of images to drop from storage.
    pub images_to_remove: Option<Vec<String>>,
}

impl UpdateRestaurantCommand {
    /// Whether the request manipulates the image set at all. A request with
    /// no image directives leaves the stored gallery untouched.
    fn edits_images(&self) -> bool {
        !self.new_images.is_empty()
            || self.images_to_keep.is_some()
            || self.images_to_remove.is_some()
    }
}

/// Handler for listing updates.
///
/// Ordering is deliberate: everything that can fail without side effects
/// (ownership, field validation, keep-list resolution, the image floor,
/// geocoding) runs before the first destructive storage call.
pub struct UpdateRestaurantHandler {
    restaurants: Arc<dyn RestaurantRepository>,
    geocoder: Arc<dyn Geocoder>,
    media: Arc<dyn MediaStore>,
}

impl UpdateRestaurantHandler {
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
        cmd: UpdateRestaurantCommand,
    ) -> Result<RestaurantView, RestaurantError> {
        // 1. Fetch and enforce ownership
        let existing = self
            .restaurants
            .find_by_id(&cmd.restaurant_id)
            .await?
            .ok_or(RestaurantError::NotFound(cmd.restaurant_id))?;
        if !existing.is_owned_by(&cmd.owner_id) {
            return Err(RestaurantError::Forbidden);
        }

        // 2. Validate the patch before any side effect
        cmd.patch.validate()?;

        // 3. Resolve the keep-list and enforce the image floor before any
        //    destructive storage operation
        let kept_keys = match &cmd.images_to_keep {
            Some(urls) => urls
                .iter()
                .map(|url| {
                    self.media
                        .key_from_signed_url(url)
                        .map_err(|_| RestaurantError::InvalidImageReference(url.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };
        if cmd.edits_images() {
            let final_count = kept_keys.len() + cmd.new_images.len();
            if final_count < MIN_IMAGES {
                return Err(RestaurantError::insufficient_images(final_count));
            }
        }

        // 4. Resolve coordinates: explicit pair wins; re-geocode only when
        //    the postal location actually changed
        let coordinates = match cmd.patch.coordinates {
            Some((lat, lng)) => {
                Coordinates::new(lat, lng).map_err(RestaurantError::ValidationFailed)?
            }
            None if cmd.patch.changes_location(&existing) => {
                let address = cmd.patch.address.as_deref().unwrap_or(&existing.address);
                let city = cmd.patch.city.as_deref().unwrap_or(&existing.city);
                let pin_code = cmd.patch.pin_code.as_deref().unwrap_or(&existing.pin_code);
                self.geocoder
                    .geocode(address, city, pin_code)
                    .await
                    .map_err(map_geocode_error)?
            }
            None => existing.coordinates,
        };

        // 5. Apply the image diff: best-effort removals, then new uploads
        let images = if cmd.edits_images() {
            for url in cmd.images_to_remove.iter().flatten() {
                match self.media.key_from_signed_url(url) {
                    Ok(key) => {
                        if let Err(e) = self.media.delete(&key).await {
                            // Removals are not load-bearing for the
                            // remaining set; log and move on.
                            tracing::warn!(key = %key, error = %e, "image removal failed during update");
                        }
                    }
                    Err(e) => {
                        tracing::warn!(url = %url, error = %e, "skipping unparseable image removal reference");
                    }
                }
            }

            let new_keys = store_all(self.media.as_ref(), &cmd.owner_id, &cmd.new_images).await?;
            let mut images = kept_keys;
            images.extend(new_keys);
            images
        } else {
            existing.images.clone()
        };

        // 6. Persist the merged record
        let mut updated = cmd.patch.apply_to(&existing);
        updated.coordinates = coordinates;
        updated.images = images;
        updated.updated_at = Timestamp::now();
        self.restaurants.update(&updated).await?;

        // 7. Rehydrate keys to signed URLs
        into_view(self.media.as_ref(), updated).await
    }
}
