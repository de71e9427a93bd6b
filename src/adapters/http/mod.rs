//! HTTP adapters - the REST API surface.
//!
//! Each resource has its own `dto`/`handlers`/`routes` triple. Cookie
//! handling, the auth gate, and the error envelope are shared.

pub mod auth;
pub mod cookies;
pub mod error;
pub mod middleware;
pub mod restaurant;

use axum::{routing::get, Json, Router};

use self::auth::AuthHandlers;
use self::middleware::{auth_middleware, AuthState};
use self::restaurant::RestaurantHandlers;

/// Assembles the full API router. The auth gate wraps every route; routes
/// that tolerate anonymous callers simply never demand the injected user.
pub fn api_router(
    auth_handlers: AuthHandlers,
    restaurant_handlers: RestaurantHandlers,
    tokens: AuthState,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth::auth_routes(auth_handlers))
        .nest(
            "/api/restaurants",
            restaurant::restaurant_routes(restaurant_handlers),
        )
        .layer(axum::middleware::from_fn_with_state(tokens, auth_middleware))
}

/// GET /health - liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
