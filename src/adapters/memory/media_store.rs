//! In-memory implementation of MediaStore.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{MediaStore, MediaStoreError};

const FAKE_HOST: &str = "media.test";

/// In-memory object store. Signed URLs use a fixed fake host so that
/// `key_from_signed_url` exercises the same parse-and-invert contract as
/// the S3 adapter.
#[derive(Default)]
pub struct InMemoryMediaStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    deleted: Mutex<Vec<String>>,
    fail_writes: AtomicBool,
    fail_deletes: AtomicBool,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every subsequent `store` call fails.
    pub fn with_failing_writes(self) -> Self {
        self.fail_writes.store(true, Ordering::Relaxed);
        self
    }

    /// Every subsequent `delete` call fails.
    pub fn fail_deletes_from_now_on(&self) {
        self.fail_deletes.store(true, Ordering::Relaxed);
    }

    /// Keys currently held.
    pub fn stored_keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    /// Keys successfully deleted so far.
    pub fn deleted_keys(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn store(&self, bytes: &[u8], key: &str) -> Result<(), MediaStoreError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(MediaStoreError::WriteFailed("simulated write failure".into()));
        }
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn signed_url(&self, key: &str) -> Result<String, MediaStoreError> {
        Ok(format!(
            "https://{}/{}?signature=stub&expires=3600",
            FAKE_HOST, key
        ))
    }

    async fn delete(&self, key: &str) -> Result<(), MediaStoreError> {
        if self.fail_deletes.load(Ordering::Relaxed) {
            return Err(MediaStoreError::DeleteFailed("simulated delete failure".into()));
        }
        self.objects.lock().unwrap().remove(key);
        self.deleted.lock().unwrap().push(key.to_string());
        Ok(())
    }

    fn key_from_signed_url(&self, url: &str) -> Result<String, MediaStoreError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|_| MediaStoreError::InvalidReference(url.to_string()))?;
        if parsed.host_str() != Some(FAKE_HOST) {
            return Err(MediaStoreError::InvalidReference(url.to_string()));
        }
        let key = parsed.path().trim_start_matches('/');
        if key.is_empty() {
            return Err(MediaStoreError::InvalidReference(url.to_string()));
        }
        Ok(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn signed_url_inverts_back_to_the_key() {
        let store = InMemoryMediaStore::new();
        store.store(&[1, 2, 3], "restaurants/u/abc.jpg").await.unwrap();
        let url = store.signed_url("restaurants/u/abc.jpg").await.unwrap();
        assert_eq!(
            store.key_from_signed_url(&url).unwrap(),
            "restaurants/u/abc.jpg"
        );
    }

    #[test]
    fn foreign_urls_are_rejected() {
        let store = InMemoryMediaStore::new();
        assert!(store
            .key_from_signed_url("https://elsewhere.example/x.jpg")
            .is_err());
        assert!(store.key_from_signed_url("not a url").is_err());
    }

    #[tokio::test]
    async fn delete_records_the_key() {
        let store = InMemoryMediaStore::new();
        store.store(&[0], "k").await.unwrap();
        store.delete("k").await.unwrap();
        assert!(store.stored_keys().is_empty());
        assert_eq!(store.deleted_keys(), vec!["k".to_string()]);
    }
}
