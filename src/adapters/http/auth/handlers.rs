//! HTTP handlers for the auth endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::auth::{
    LoginUserCommand, LoginUserHandler, RefreshSessionCommand, RefreshSessionHandler,
    RegisterUserCommand, RegisterUserHandler,
};
use crate::domain::user::AuthError;

use super::super::cookies::{cookie_value, SessionCookies, REFRESH_COOKIE};
use super::super::error::{error_response, internal_error, ErrorBody};
use super::super::middleware::RequireAuth;
use super::dto::{AuthResponse, CredentialsRequest, MessageResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AuthHandlers {
    register_handler: Arc<RegisterUserHandler>,
    login_handler: Arc<LoginUserHandler>,
    refresh_handler: Arc<RefreshSessionHandler>,
    cookies: SessionCookies,
}

impl AuthHandlers {
    pub fn new(
        register_handler: Arc<RegisterUserHandler>,
        login_handler: Arc<LoginUserHandler>,
        refresh_handler: Arc<RefreshSessionHandler>,
        cookies: SessionCookies,
    ) -> Self {
        Self {
            register_handler,
            login_handler,
            refresh_handler,
            cookies,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/auth/register - Create an account and establish a session
pub async fn register(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<CredentialsRequest>,
) -> Response {
    let cmd = RegisterUserCommand {
        email: req.email,
        password: req.password,
    };

    match handlers.register_handler.handle(cmd).await {
        Ok(session) => {
            let body = AuthResponse {
                message: "User registered".to_string(),
                user: session.user.into(),
            };
            let mut response = (StatusCode::CREATED, Json(body)).into_response();
            handlers.cookies.establish(
                response.headers_mut(),
                &session.access_token,
                &session.refresh_token,
            );
            response
        }
        Err(e) => handle_auth_error(e),
    }
}

/// POST /api/auth/login - Establish a session from credentials
pub async fn login(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<CredentialsRequest>,
) -> Response {
    let cmd = LoginUserCommand {
        email: req.email,
        password: req.password,
    };

    match handlers.login_handler.handle(cmd).await {
        Ok(session) => {
            let body = AuthResponse {
                message: "Login successful".to_string(),
                user: session.user.into(),
            };
            let mut response = (StatusCode::OK, Json(body)).into_response();
            handlers.cookies.establish(
                response.headers_mut(),
                &session.access_token,
                &session.refresh_token,
            );
            response
        }
        Err(e) => handle_auth_error(e),
    }
}

/// POST /api/auth/refresh - Rotate the token pair from the refresh cookie
pub async fn refresh(State(handlers): State<AuthHandlers>, headers: HeaderMap) -> Response {
    // An absent cookie is the same failure as a bad token.
    let refresh_token = match cookie_value(&headers, REFRESH_COOKIE) {
        Some(token) => token,
        None => return handle_auth_error(AuthError::InvalidCredentials),
    };

    match handlers
        .refresh_handler
        .handle(RefreshSessionCommand { refresh_token })
        .await
    {
        Ok(session) => {
            let body = AuthResponse {
                message: "Token refreshed".to_string(),
                user: session.user.into(),
            };
            let mut response = (StatusCode::OK, Json(body)).into_response();
            handlers.cookies.establish(
                response.headers_mut(),
                &session.access_token,
                &session.refresh_token,
            );
            response
        }
        Err(e) => handle_auth_error(e),
    }
}

/// POST /api/auth/logout - Clear the session cookies
///
/// Pure transport teardown: tokens are stateless, so outstanding tokens
/// stay valid until expiry.
pub async fn logout(State(handlers): State<AuthHandlers>, RequireAuth(_user): RequireAuth) -> Response {
    let body = MessageResponse {
        message: "Logged out".to_string(),
    };
    let mut response = (StatusCode::OK, Json(body)).into_response();
    handlers.cookies.clear(response.headers_mut());
    response
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_auth_error(error: AuthError) -> Response {
    match error {
        AuthError::DuplicateUser => error_response(
            StatusCode::BAD_REQUEST,
            ErrorBody::new("User already exists"),
        ),
        AuthError::InvalidCredentials => error_response(
            StatusCode::UNAUTHORIZED,
            ErrorBody::new("Invalid credentials"),
        ),
        AuthError::ValidationFailed(issues) => error_response(
            StatusCode::BAD_REQUEST,
            ErrorBody::with_issues("Invalid input", issues),
        ),
        AuthError::Infrastructure(detail) => internal_error(detail),
    }
}
