//! Authentication use cases: register, login, refresh.
//!
//! Handlers return tokens and user data as plain values; attaching them to
//! a transport session (cookies) is the HTTP adapter's concern.

mod login;
mod refresh;
mod register;

pub use login::{LoginUserCommand, LoginUserHandler};
pub use refresh::{RefreshSessionCommand, RefreshSessionHandler};
pub use register::{RegisterUserCommand, RegisterUserHandler};

use crate::domain::user::UserView;

/// Result of a successful register/login/refresh: a fresh token pair plus
/// the public user projection.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserView,
}
