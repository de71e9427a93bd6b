//! Password hashing port.

use crate::domain::foundation::DomainError;

/// Adaptive one-way password hashing.
///
/// Implementations must use a salted, tunable-cost algorithm; plain digests
/// are not acceptable. `verify` must not reveal *why* a comparison failed.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage.
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// Unparseable hashes verify as `false`, never as an error; login must
    /// stay uniform whatever the stored state looks like.
    fn verify(&self, password: &str, password_hash: &str) -> bool;
}
