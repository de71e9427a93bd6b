//! Authentication middleware and extractors for axum.
//!
//! The middleware turns the access-token cookie into an injected
//! `CurrentUser` via the `TokenService` port, a pure `token -> identity`
//! check, no session storage. A missing cookie passes through untouched so
//! optional-auth routes keep working; handlers that need a caller use the
//! `RequireAuth` extractor, which rejects with 401.
//!
//! ```text
//! Request → auth_middleware → injects CurrentUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::UserId;
use crate::ports::{TokenError, TokenService};

use super::super::cookies::{cookie_value, ACCESS_COOKIE};
use super::super::error::ErrorBody;

/// Auth middleware state - the token verifier.
pub type AuthState = Arc<dyn TokenService>;

/// The authenticated caller, as proven by a valid access token. Identity
/// only; any further user state must come from the credential store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
}

/// Validates the access-token cookie.
///
/// 1. Reads the `accessToken` cookie
/// 2. Verifies it through the `TokenService` port
/// 3. On success, injects [`CurrentUser`] into request extensions
/// 4. On a missing cookie, continues without injecting (optional-auth routes)
/// 5. On an invalid or expired token, returns 401 Unauthorized
pub async fn auth_middleware(
    State(tokens): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    match cookie_value(request.headers(), ACCESS_COOKIE) {
        Some(token) => match tokens.verify_access(&token) {
            Ok(user_id) => {
                request.extensions_mut().insert(CurrentUser { id: user_id });
                next.run(request).await
            }
            Err(e) => {
                let message = match e {
                    TokenError::Expired => "Token expired",
                    _ => "Invalid token",
                };
                (StatusCode::UNAUTHORIZED, Json(ErrorBody::new(message))).into_response()
            }
        },
        None => next.run(request).await,
    }
}

/// Extractor that requires an authenticated caller.
///
/// Returns 401 when the auth middleware did not inject a user (no cookie,
/// or the middleware was not applied to this route).
#[derive(Debug, Clone)]
pub struct RequireAuth(pub CurrentUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<CurrentUser>()
                .copied()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Extractor for optional authentication.
///
/// `None` when no valid token accompanied the request.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> axum::extract::FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user = parts.extensions.get::<CurrentUser>().copied();
            Ok(OptionalAuth(user))
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid authentication token was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let message = match self {
            AuthRejection::Unauthenticated => "Authentication required",
        };
        (StatusCode::UNAUTHORIZED, Json(ErrorBody::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::JwtTokenService;

    fn user() -> CurrentUser {
        CurrentUser { id: UserId::new() }
    }

    #[tokio::test]
    async fn require_auth_extracts_user_from_extensions() {
        use axum::extract::FromRequestParts;
        use axum::http::Request;

        let expected = user();
        let mut request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        request.extensions_mut().insert(expected);

        let (mut parts, _body) = request.into_parts();
        let result: Result<RequireAuth, AuthRejection> =
            RequireAuth::from_request_parts(&mut parts, &()).await;

        let RequireAuth(current) = result.unwrap();
        assert_eq!(current, expected);
    }

    #[tokio::test]
    async fn require_auth_fails_without_user() {
        use axum::extract::FromRequestParts;
        use axum::http::Request;

        let request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let result: Result<RequireAuth, AuthRejection> =
            RequireAuth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthRejection::Unauthenticated)));
    }

    #[tokio::test]
    async fn optional_auth_returns_none_when_absent() {
        use axum::extract::FromRequestParts;
        use axum::http::Request;

        let request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let OptionalAuth(current) = OptionalAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(current.is_none());
    }

    #[test]
    fn auth_rejection_returns_401() {
        let response = AuthRejection::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn auth_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthState>();
    }

    #[test]
    fn token_verification_is_usable_as_auth_state() {
        let tokens: AuthState = Arc::new(JwtTokenService::for_tests());
        let id = UserId::new();
        let token = tokens.issue_access(&id).unwrap();
        assert_eq!(tokens.verify_access(&token).unwrap(), id);
    }
}
