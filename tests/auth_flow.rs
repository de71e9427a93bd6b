//! Integration tests for the authentication lifecycle.
//!
//! Real application handlers wired over in-memory adapters: register,
//! login, refresh rotation, and the error-uniformity guarantees.

use std::sync::Arc;

use dinedex::adapters::auth::{BcryptPasswordHasher, JwtTokenService};
use dinedex::adapters::memory::InMemoryUserRepository;
use dinedex::application::auth::{
    LoginUserCommand, LoginUserHandler, RefreshSessionCommand, RefreshSessionHandler,
    RegisterUserCommand, RegisterUserHandler,
};
use dinedex::domain::user::AuthError;
use dinedex::ports::TokenService;

struct AuthStack {
    tokens: Arc<JwtTokenService>,
    register: RegisterUserHandler,
    login: LoginUserHandler,
    refresh: RefreshSessionHandler,
}

fn auth_stack() -> AuthStack {
    let users = Arc::new(InMemoryUserRepository::new());
    let hasher = Arc::new(BcryptPasswordHasher::new(4));
    let tokens = Arc::new(JwtTokenService::for_tests());

    AuthStack {
        tokens: tokens.clone(),
        register: RegisterUserHandler::new(users.clone(), hasher.clone(), tokens.clone()),
        login: LoginUserHandler::new(users.clone(), hasher.clone(), tokens.clone()),
        refresh: RefreshSessionHandler::new(users, tokens),
    }
}

fn credentials(email: &str, password: &str) -> RegisterUserCommand {
    RegisterUserCommand {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn register_login_refresh_lifecycle() {
    let stack = auth_stack();

    let registered = stack
        .register
        .handle(credentials("ada@example.com", "correct horse"))
        .await
        .unwrap();
    assert_eq!(registered.user.email, "ada@example.com");

    // Both freshly-issued tokens verify and agree on the user.
    let from_access = stack.tokens.verify_access(&registered.access_token).unwrap();
    let from_refresh = stack
        .tokens
        .verify_refresh(&registered.refresh_token)
        .unwrap();
    assert_eq!(from_access, registered.user.id);
    assert_eq!(from_refresh, registered.user.id);

    let logged_in = stack
        .login
        .handle(LoginUserCommand {
            email: "ada@example.com".to_string(),
            password: "correct horse".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(logged_in.user.id, registered.user.id);

    // Refresh rotates the pair; the rotated pair stays usable.
    let refreshed = stack
        .refresh
        .handle(RefreshSessionCommand {
            refresh_token: logged_in.refresh_token,
        })
        .await
        .unwrap();
    assert_eq!(refreshed.user.id, registered.user.id);

    let refreshed_again = stack
        .refresh
        .handle(RefreshSessionCommand {
            refresh_token: refreshed.refresh_token,
        })
        .await
        .unwrap();
    assert_eq!(refreshed_again.user.id, registered.user.id);
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let stack = auth_stack();

    stack
        .register
        .handle(credentials("a@x.com", "password-one"))
        .await
        .unwrap();

    let second = stack
        .register
        .handle(credentials("a@x.com", "password-two"))
        .await;
    assert_eq!(second.unwrap_err(), AuthError::DuplicateUser);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let stack = auth_stack();
    stack
        .register
        .handle(credentials("real@example.com", "hunter22"))
        .await
        .unwrap();

    let wrong_password = stack
        .login
        .handle(LoginUserCommand {
            email: "real@example.com".to_string(),
            password: "not-the-password".to_string(),
        })
        .await
        .unwrap_err();

    let unknown_account = stack
        .login
        .handle(LoginUserCommand {
            email: "ghost@example.com".to_string(),
            password: "hunter22".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(wrong_password, unknown_account);
    assert_eq!(wrong_password.message(), unknown_account.message());
}

#[tokio::test]
async fn refresh_rejects_access_tokens_and_garbage() {
    let stack = auth_stack();
    let registered = stack
        .register
        .handle(credentials("bob@example.com", "hunter22"))
        .await
        .unwrap();

    // An access token is not a refresh token.
    let swapped = stack
        .refresh
        .handle(RefreshSessionCommand {
            refresh_token: registered.access_token,
        })
        .await;
    assert_eq!(swapped.unwrap_err(), AuthError::InvalidCredentials);

    let garbage = stack
        .refresh
        .handle(RefreshSessionCommand {
            refresh_token: "nonsense".to_string(),
        })
        .await;
    assert_eq!(garbage.unwrap_err(), AuthError::InvalidCredentials);
}

#[tokio::test]
async fn validation_rejects_bad_credentials_with_field_issues() {
    let stack = auth_stack();
    let result = stack
        .register
        .handle(credentials("not-an-email", "short"))
        .await;

    match result.unwrap_err() {
        AuthError::ValidationFailed(issues) => {
            let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
            assert!(fields.contains(&"email"));
            assert!(fields.contains(&"password"));
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
}
