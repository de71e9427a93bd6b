//! RefreshSessionHandler - Command handler for refresh-token rotation.

use std::sync::Arc;

use crate::domain::user::AuthError;
use crate::ports::{TokenService, UserRepository};

use super::AuthSession;

/// Command to exchange a refresh token for a new token pair.
#[derive(Debug, Clone)]
pub struct RefreshSessionCommand {
    pub refresh_token: String,
}

/// Handler for refresh-token rotation.
///
/// A missing, expired, or malformed token, and a token whose user no
/// longer resolves, all fail with the uniform `InvalidCredentials`. On
/// success BOTH tokens are reissued; the old refresh token is not revoked
/// (tokens are stateless) but callers must overwrite stored credentials.
pub struct RefreshSessionHandler {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenService>,
}

impl RefreshSessionHandler {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenService>) -> Self {
        Self { users, tokens }
    }

    pub async fn handle(&self, cmd: RefreshSessionCommand) -> Result<AuthSession, AuthError> {
        let user_id = self
            .tokens
            .verify_refresh(&cmd.refresh_token)
            .map_err(|_| AuthError::InvalidCredentials)?;

        // The token proves identity at issuance time only; the store decides
        // whether the user still exists.
        let user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let access_token = self
            .tokens
            .issue_access(&user.id)
            .map_err(|e| AuthError::infrastructure(e.to_string()))?;
        let refresh_token = self
            .tokens
            .issue_refresh(&user.id)
            .map_err(|e| AuthError::infrastructure(e.to_string()))?;

        Ok(AuthSession {
            access_token,
            refresh_token,
            user: user.view(),
        })
    }
}
