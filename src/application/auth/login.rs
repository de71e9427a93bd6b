//! LoginUserHandler - Command handler for credential login.

use std::sync::Arc;

use crate::domain::user::AuthError;
use crate::ports::{PasswordHasher, TokenService, UserRepository};

use super::AuthSession;

/// Command to log in with email and password.
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
    pub email: String,
    pub password: String,
}

/// Handler for credential login.
///
/// Unknown email and wrong password both fail with the identical
/// `InvalidCredentials` value; the response must not reveal which half of
/// the pair was wrong.
pub struct LoginUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl LoginUserHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: LoginUserCommand) -> Result<AuthSession, AuthError> {
        let user = self
            .users
            .find_by_email(&cmd.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(&cmd.password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

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
