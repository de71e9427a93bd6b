//! In-memory implementation of UserRepository.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

/// In-memory user store. Email uniqueness is enforced on insert, mirroring
/// the unique index the PostgreSQL adapter relies on.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, DomainError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Err(DomainError::new(
                ErrorCode::DuplicateEmail,
                format!("email already registered: {}", email),
            ));
        }
        let user = User {
            id: UserId::new(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Timestamp::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == *id)
            .cloned())
    }
}
