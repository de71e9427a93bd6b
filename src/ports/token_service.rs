//! Token service port.
//!
//! Tokens are stateless and carry only the user id plus an expiry; callers
//! must re-fetch user state from the credential store; the repository
//! lookup is authoritative, never the token payload. Verification is a pure
//! `token -> identity` function so the core never assumes a transport
//! session exists.

use thiserror::Error;

use crate::domain::foundation::UserId;

/// Errors from token issuance or verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token's expiry has passed.
    #[error("Token expired")]
    Expired,

    /// The token is structurally invalid or its signature doesn't verify.
    #[error("Malformed token")]
    Malformed,

    /// The service was constructed without a usable signing secret.
    #[error("Token service misconfigured: {0}")]
    Config(String),
}

/// Issues and verifies the access/refresh token pair.
///
/// Access tokens are short-lived (minutes); refresh tokens are long-lived
/// (days) and signed with a distinct secret so one can never stand in for
/// the other.
pub trait TokenService: Send + Sync {
    /// Issue a short-lived access token for the user.
    fn issue_access(&self, user_id: &UserId) -> Result<String, TokenError>;

    /// Issue a long-lived refresh token for the user.
    fn issue_refresh(&self, user_id: &UserId) -> Result<String, TokenError>;

    /// Verify an access token and return the embedded user id.
    fn verify_access(&self, token: &str) -> Result<UserId, TokenError>;

    /// Verify a refresh token and return the embedded user id.
    fn verify_refresh(&self, token: &str) -> Result<UserId, TokenError>;
}
