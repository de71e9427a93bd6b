//! Credential store port.
//!
//! Persists user identities. Email uniqueness is part of the contract and
//! must be enforced at the data layer (unique index), not just checked
//! before insert; concurrent registrations with the same email race
//! otherwise.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

/// Repository port for user identities.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user.
    ///
    /// # Errors
    ///
    /// - `DuplicateEmail` if the email is already registered
    /// - `DatabaseError` on persistence failure
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, DomainError>;

    /// Find a user by email. Returns `None` if not found.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;
}
