//! DeleteRestaurantHandler - Command handler for deleting a listing.

use std::sync::Arc;

use crate::domain::foundation::{RestaurantId, UserId};
use crate::domain::restaurant::RestaurantError;
use crate::ports::{MediaStore, RestaurantRepository};

/// Command to delete a listing. Only the owner may issue it.
#[derive(Debug, Clone)]
pub struct DeleteRestaurantCommand {
    pub restaurant_id: RestaurantId,
    pub owner_id: UserId,
}

/// Handler for listing deletion.
///
/// Stored images are removed best-effort per key before the record goes;
/// a failed object deletion is logged, never fatal.
pub struct DeleteRestaurantHandler {
    restaurants: Arc<dyn RestaurantRepository>,
    media: Arc<dyn MediaStore>,
}

impl DeleteRestaurantHandler {
    pub fn new(restaurants: Arc<dyn RestaurantRepository>, media: Arc<dyn MediaStore>) -> Self {
        Self { restaurants, media }
    }

    pub async fn handle(&self, cmd: DeleteRestaurantCommand) -> Result<(), RestaurantError> {
        let existing = self
            .restaurants
            .find_by_id(&cmd.restaurant_id)
            .await?
            .ok_or(RestaurantError::NotFound(cmd.restaurant_id))?;
        if !existing.is_owned_by(&cmd.owner_id) {
            return Err(RestaurantError::Forbidden);
        }

        for key in &existing.images {
            if let Err(e) = self.media.delete(key).await {
                tracing::warn!(key = %key, error = %e, "image removal failed during listing deletion");
            }
        }

        self.restaurants.delete(&cmd.restaurant_id).await?;
        Ok(())
    }
}
