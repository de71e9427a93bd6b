//! Bcrypt implementation of PasswordHasher.

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PasswordHasher;

/// Password hasher backed by bcrypt.
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Production cost factor. The contract floor is 10; 12 buys headroom.
    pub const DEFAULT_COST: u32 = 12;

    /// Creates a hasher with an explicit cost (tests use a low cost to stay
    /// fast; production uses [`Self::DEFAULT_COST`]).
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        bcrypt::hash(password, self.cost).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("password hashing failed: {}", e),
            )
        })
    }

    fn verify(&self, password: &str, password_hash: &str) -> bool {
        bcrypt::verify(password, password_hash).unwrap_or(false)
    }
}
