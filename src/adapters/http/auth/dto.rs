//! HTTP DTOs for the auth endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::user::UserView;

/// Request body for register and login.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Public user shape in responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
}

impl From<UserView> for UserResponse {
    fn from(view: UserView) -> Self {
        Self {
            id: view.id.to_string(),
            email: view.email,
        }
    }
}

/// Response carrying a message plus the session's user.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Bare message response (logout).
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
