//! Media store port.
//!
//! Listings reference images by storage key internally; keys are exchanged
//! for time-limited signed URLs at the API boundary and never exposed raw.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from image storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaStoreError {
    /// The provider rejected an upload, or the image could not be decoded.
    #[error("Failed to store image: {0}")]
    WriteFailed(String),

    /// A retrieval URL could not be produced.
    #[error("Failed to sign image URL: {0}")]
    ReadFailed(String),

    /// The provider rejected a deletion.
    #[error("Failed to delete image: {0}")]
    DeleteFailed(String),

    /// A client-echoed signed URL could not be mapped back to a key.
    #[error("Unrecognized image reference: {0}")]
    InvalidReference(String),
}

/// Durable image storage with signed retrieval.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Normalize and durably store image bytes under `key`.
    async fn store(&self, bytes: &[u8], key: &str) -> Result<(), MediaStoreError>;

    /// Produce a time-limited retrieval URL for `key`.
    async fn signed_url(&self, key: &str) -> Result<String, MediaStoreError>;

    /// Remove the object at `key`.
    async fn delete(&self, key: &str) -> Result<(), MediaStoreError>;

    /// Inverse of [`MediaStore::signed_url`]: recover the storage key from a
    /// previously-issued signed URL (used when a client echoes URLs back to
    /// mark images it wants to keep).
    fn key_from_signed_url(&self, url: &str) -> Result<String, MediaStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn media_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn MediaStore) {}
    }
}
