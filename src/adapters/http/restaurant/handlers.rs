//! HTTP handlers for the restaurant endpoints.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::restaurant::{
    CreateRestaurantCommand, CreateRestaurantHandler, DeleteRestaurantCommand,
    DeleteRestaurantHandler, GetRestaurantHandler, GetRestaurantQuery, ListRestaurantsHandler,
    ListRestaurantsQuery, UpdateRestaurantCommand, UpdateRestaurantHandler,
};
use crate::domain::foundation::{PageRequest, RestaurantId};
use crate::domain::restaurant::RestaurantError;
use crate::ports::ListScope;

use super::super::error::{error_response, internal_error, ErrorBody};
use super::super::middleware::{OptionalAuth, RequireAuth};
use super::dto::{
    ListRestaurantsParams, MessageResponse, RestaurantCommandResponse, RestaurantEnvelope,
    RestaurantListResponse, RestaurantResponse,
};
use super::form::{self, FormError};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct RestaurantHandlers {
    create_handler: Arc<CreateRestaurantHandler>,
    update_handler: Arc<UpdateRestaurantHandler>,
    delete_handler: Arc<DeleteRestaurantHandler>,
    get_handler: Arc<GetRestaurantHandler>,
    list_handler: Arc<ListRestaurantsHandler>,
}

impl RestaurantHandlers {
    pub fn new(
        create_handler: Arc<CreateRestaurantHandler>,
        update_handler: Arc<UpdateRestaurantHandler>,
        delete_handler: Arc<DeleteRestaurantHandler>,
        get_handler: Arc<GetRestaurantHandler>,
        list_handler: Arc<ListRestaurantsHandler>,
    ) -> Self {
        Self {
            create_handler,
            update_handler,
            delete_handler,
            get_handler,
            list_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/restaurants - Paginated listing with optional search
///
/// Anonymous callers see the public directory; `?mine=true` narrows to the
/// authenticated caller's own listings.
pub async fn list_restaurants(
    State(handlers): State<RestaurantHandlers>,
    OptionalAuth(user): OptionalAuth,
    Query(params): Query<ListRestaurantsParams>,
) -> Response {
    let scope = if params.mine {
        match user {
            Some(current) => ListScope::Owner(current.id),
            None => {
                return error_response(
                    StatusCode::UNAUTHORIZED,
                    ErrorBody::new("Authentication required"),
                )
            }
        }
    } else {
        ListScope::Public
    };

    let query = ListRestaurantsQuery {
        scope,
        page: PageRequest::new(params.page, params.limit),
        search: params.search,
    };

    match handlers.list_handler.handle(query).await {
        Ok(listing) => {
            let response: RestaurantListResponse = listing.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_restaurant_error(e),
    }
}

/// GET /api/restaurants/:id - Fetch one listing
pub async fn get_restaurant(
    State(handlers): State<RestaurantHandlers>,
    Path(restaurant_id): Path<String>,
) -> Response {
    let restaurant_id = match parse_id(&restaurant_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .get_handler
        .handle(GetRestaurantQuery { restaurant_id })
        .await
    {
        Ok(view) => {
            let body = RestaurantEnvelope {
                restaurant: view.into(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_restaurant_error(e),
    }
}

/// POST /api/restaurants - Create a listing (multipart)
pub async fn create_restaurant(
    State(handlers): State<RestaurantHandlers>,
    RequireAuth(user): RequireAuth,
    mut multipart: Multipart,
) -> Response {
    let form = match form::parse_create(&mut multipart).await {
        Ok(form) => form,
        Err(e) => return handle_form_error(e),
    };

    let cmd = CreateRestaurantCommand {
        owner_id: user.id,
        draft: form.draft,
        images: form.images,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(view) => {
            let body = RestaurantCommandResponse {
                message: "Restaurant created successfully".to_string(),
                restaurant: RestaurantResponse::from(view),
            };
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Err(e) => handle_restaurant_error(e),
    }
}

/// PUT/PATCH /api/restaurants/:id - Update a listing (multipart, owner only)
pub async fn update_restaurant(
    State(handlers): State<RestaurantHandlers>,
    RequireAuth(user): RequireAuth,
    Path(restaurant_id): Path<String>,
    mut multipart: Multipart,
) -> Response {
    let restaurant_id = match parse_id(&restaurant_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let form = match form::parse_update(&mut multipart).await {
        Ok(form) => form,
        Err(e) => return handle_form_error(e),
    };

    let cmd = UpdateRestaurantCommand {
        restaurant_id,
        owner_id: user.id,
        patch: form.patch,
        new_images: form.new_images,
        images_to_keep: form.images_to_keep,
        images_to_remove: form.images_to_remove,
    };

    match handlers.update_handler.handle(cmd).await {
        Ok(view) => {
            let body = RestaurantCommandResponse {
                message: "Restaurant updated successfully".to_string(),
                restaurant: RestaurantResponse::from(view),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_restaurant_error(e),
    }
}

/// DELETE /api/restaurants/:id - Delete a listing (owner only)
pub async fn delete_restaurant(
    State(handlers): State<RestaurantHandlers>,
    RequireAuth(user): RequireAuth,
    Path(restaurant_id): Path<String>,
) -> Response {
    let restaurant_id = match parse_id(&restaurant_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = DeleteRestaurantCommand {
        restaurant_id,
        owner_id: user.id,
    };

    match handlers.delete_handler.handle(cmd).await {
        Ok(()) => {
            let body = MessageResponse {
                message: "Restaurant deleted successfully".to_string(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_restaurant_error(e),
    }
}

fn parse_id(raw: &str) -> Result<RestaurantId, Response> {
    raw.parse::<RestaurantId>().map_err(|_| {
        error_response(
            StatusCode::BAD_REQUEST,
            ErrorBody::new("Invalid restaurant ID"),
        )
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_restaurant_error(error: RestaurantError) -> Response {
    match error {
        RestaurantError::NotFound(_) => error_response(
            StatusCode::NOT_FOUND,
            ErrorBody::new("Restaurant not found"),
        ),
        RestaurantError::Forbidden => {
            error_response(StatusCode::FORBIDDEN, ErrorBody::new("Permission denied"))
        }
        RestaurantError::InsufficientImages { .. } => error_response(
            StatusCode::BAD_REQUEST,
            ErrorBody::new(error.message()),
        ),
        RestaurantError::ValidationFailed(issues) => error_response(
            StatusCode::BAD_REQUEST,
            ErrorBody::with_issues("Invalid input", issues),
        ),
        // Unresolvable input is the caller's to fix; provider faults are ours.
        RestaurantError::GeocodingFailed(reason) => error_response(
            StatusCode::BAD_REQUEST,
            ErrorBody::new(format!("Geocoding failed: {}", reason)),
        ),
        RestaurantError::GeocodingUnavailable(reason) => {
            tracing::error!(error = %reason, "geocoding provider unavailable");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("Geocoding service unavailable"),
            )
        }
        RestaurantError::InvalidImageReference(_) => error_response(
            StatusCode::BAD_REQUEST,
            ErrorBody::new("Unrecognized image reference"),
        ),
        RestaurantError::StorageFailed(reason) => {
            tracing::error!(error = %reason, "image storage failure");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("Image storage failed"),
            )
        }
        RestaurantError::Infrastructure(detail) => internal_error(detail),
    }
}

fn handle_form_error(error: FormError) -> Response {
    match error {
        FormError::Malformed(message) => {
            error_response(StatusCode::BAD_REQUEST, ErrorBody::new(message))
        }
        FormError::Validation(issues) => error_response(
            StatusCode::BAD_REQUEST,
            ErrorBody::with_issues("Invalid input", issues),
        ),
        FormError::UnsupportedImageType(_) => error_response(
            StatusCode::BAD_REQUEST,
            ErrorBody::new("Only JPEG and PNG images are allowed"),
        ),
        FormError::ImageTooLarge => error_response(
            StatusCode::BAD_REQUEST,
            ErrorBody::new("Images must be 5 MiB or smaller"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::FieldIssue;

    #[test]
    fn not_found_maps_to_404() {
        let response = handle_restaurant_error(RestaurantError::NotFound(RestaurantId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let response = handle_restaurant_error(RestaurantError::Forbidden);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn image_floor_maps_to_400() {
        let response =
            handle_restaurant_error(RestaurantError::InsufficientImages { provided: 1 });
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn geocoding_split_is_400_for_input_500_for_provider() {
        let unresolvable =
            handle_restaurant_error(RestaurantError::GeocodingFailed("ZERO_RESULTS".into()));
        assert_eq!(unresolvable.status(), StatusCode::BAD_REQUEST);

        let provider_down =
            handle_restaurant_error(RestaurantError::GeocodingUnavailable("timeout".into()));
        assert_eq!(provider_down.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_issues_map_to_400() {
        let response = handle_form_error(FormError::Validation(vec![FieldIssue::new(
            "name",
            "is required",
        )]));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_id_maps_to_400() {
        let response = parse_id("not-a-uuid").unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
