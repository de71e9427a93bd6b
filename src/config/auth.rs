//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Authentication configuration (JWT secrets and token lifetimes)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret for signing access tokens
    pub access_token_secret: Secret<String>,

    /// Secret for signing refresh tokens (distinct from the access secret)
    pub refresh_token_secret: Secret<String>,

    /// Access token lifetime in seconds
    #[serde(default = "default_access_ttl")]
    pub access_ttl_secs: i64,

    /// Refresh token lifetime in seconds
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_secs: i64,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// The exact lifetimes are tunable, but the access TTL must stay well
    /// below the refresh TTL.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.access_token_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("ACCESS_TOKEN_SECRET"));
        }
        if self.refresh_token_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("REFRESH_TOKEN_SECRET"));
        }
        if self.access_ttl_secs <= 0
            || self.refresh_ttl_secs <= 0
            || self.access_ttl_secs >= self.refresh_ttl_secs
        {
            return Err(ValidationError::InvalidTokenTtls);
        }
        Ok(())
    }
}

/// 15 minutes.
fn default_access_ttl() -> i64 {
    15 * 60
}

/// 7 days.
fn default_refresh_ttl() -> i64 {
    7 * 24 * 60 * 60
}
