//! User identity and authentication workflow types.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::foundation::{DomainError, ErrorCode, FieldIssue, Timestamp, UserId};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A registered user. The password hash never leaves the credential store
/// boundary; API responses carry [`UserView`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

impl User {
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

/// Public projection of a user for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub email: String,
}

/// Validates registration/login credentials before any side effect runs.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    let mut issues = Vec::new();
    if !EMAIL_PATTERN.is_match(email) {
        issues.push(FieldIssue::new("email", "must be a valid email address"));
    }
    if password.len() < MIN_PASSWORD_LEN {
        issues.push(FieldIssue::new(
            "password",
            format!("must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    if issues.is_empty() {
        Ok(())
    } else {
        Err(AuthError::ValidationFailed(issues))
    }
}

/// Authentication workflow errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Registration attempted with an email that already exists.
    DuplicateUser,
    /// Login or refresh failed. Deliberately uniform: unknown email, wrong
    /// password, and bad refresh tokens all produce this same value so the
    /// API cannot be used to enumerate accounts.
    InvalidCredentials,
    /// Credential input failed validation.
    ValidationFailed(Vec<FieldIssue>),
    /// Infrastructure error.
    Infrastructure(String),
}

impl AuthError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        AuthError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AuthError::DuplicateUser => ErrorCode::DuplicateEmail,
            AuthError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AuthError::ValidationFailed(_) => ErrorCode::ValidationFailed,
            AuthError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AuthError::DuplicateUser => "User already exists".to_string(),
            AuthError::InvalidCredentials => "Invalid credentials".to_string(),
            AuthError::ValidationFailed(_) => "Invalid input".to_string(),
            AuthError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AuthError {}

impl From<DomainError> for AuthError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DuplicateEmail => AuthError::DuplicateUser,
            ErrorCode::UserNotFound | ErrorCode::InvalidCredentials => {
                AuthError::InvalidCredentials
            }
            _ => AuthError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_credentials() {
        assert!(validate_credentials("user@example.com", "hunter22").is_ok());
    }

    #[test]
    fn rejects_malformed_email() {
        let err = validate_credentials("not-an-email", "hunter22").unwrap_err();
        match err {
            AuthError::ValidationFailed(issues) => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].field, "email");
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn rejects_short_password() {
        let err = validate_credentials("user@example.com", "five5").unwrap_err();
        match err {
            AuthError::ValidationFailed(issues) => {
                assert_eq!(issues[0].field, "password");
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn collects_both_issues_at_once() {
        let err = validate_credentials("nope", "x").unwrap_err();
        match err {
            AuthError::ValidationFailed(issues) => assert_eq!(issues.len(), 2),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn unknown_user_and_bad_password_map_to_same_error() {
        let a: AuthError = DomainError::new(ErrorCode::UserNotFound, "no such user").into();
        let b = AuthError::InvalidCredentials;
        assert_eq!(a, b);
    }

    #[test]
    fn user_view_omits_password_hash() {
        let user = User {
            id: UserId::new(),
            email: "user@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            created_at: Timestamp::now(),
        };
        let json = serde_json::to_value(user.view()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "user@example.com");
    }
}
