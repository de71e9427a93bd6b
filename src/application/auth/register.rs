//! RegisterUserHandler - Command handler for account registration.

use std::sync::Arc;

use crate::domain::user::{validate_credentials, AuthError};
use crate::ports::{PasswordHasher, TokenService, UserRepository};

use super::AuthSession;

/// Command to register a new account.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub email: String,
    pub password: String,
}

/// Handler for account registration.
pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl RegisterUserHandler {
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

    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<AuthSession, AuthError> {
        // 1. Validate input before any side effect
        validate_credentials(&cmd.email, &cmd.password)?;

        // 2. Reject known duplicates early; the repository's unique index
        //    still backstops the concurrent-registration race.
        if self.users.find_by_email(&cmd.email).await?.is_some() {
            return Err(AuthError::DuplicateUser);
        }

        // 3. Hash and persist
        let password_hash = self.hasher.hash(&cmd.password)?;
        let user = self.users.create(&cmd.email, &password_hash).await?;

        // 4. Establish the session
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
