//! HTTP adapter for the restaurant endpoints.

mod dto;
mod form;
mod handlers;
mod routes;

pub use handlers::RestaurantHandlers;
pub use routes::restaurant_routes;
