//! HTTP routes for the restaurant endpoints.

use axum::{routing::get, Router};

use super::handlers::{
    create_restaurant, delete_restaurant, get_restaurant, list_restaurants, update_restaurant,
    RestaurantHandlers,
};

/// Creates the restaurant router with all endpoints.
pub fn restaurant_routes(handlers: RestaurantHandlers) -> Router {
    Router::new()
        .route("/", get(list_restaurants).post(create_restaurant))
        .route(
            "/:id",
            get(get_restaurant)
                .put(update_restaurant)
                .patch(update_restaurant)
                .delete(delete_restaurant),
        )
        .with_state(handlers)
}
