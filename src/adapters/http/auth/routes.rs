//! HTTP routes for the auth endpoints.

use axum::{routing::post, Router};

use super::handlers::{login, logout, refresh, register, AuthHandlers};

/// Creates the auth router with all endpoints.
pub fn auth_routes(handlers: AuthHandlers) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
        .with_state(handlers)
}
