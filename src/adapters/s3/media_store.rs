//! S3 implementation of the MediaStore port.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

use crate::ports::{MediaStore, MediaStoreError};

use super::image_ops;
use super::sigv4::{presign_url, PresignRequest};

/// How long write/delete presigned requests stay valid. Retrieval URLs use
/// the configured (1 hour) TTL; internal requests only need to survive the
/// call itself.
const INTERNAL_REQUEST_TTL_SECS: u64 = 300;

/// Configuration for the S3 media store.
#[derive(Debug, Clone)]
pub struct S3MediaStoreConfig {
    pub region: String,
    pub bucket: String,
    pub access_key_id: String,
    pub secret_access_key: Secret<String>,
    /// Lifetime of retrieval URLs handed to clients.
    pub url_ttl_secs: u64,
    /// Request timeout for uploads and deletes.
    pub timeout: Duration,
}

impl S3MediaStoreConfig {
    pub fn new(
        region: impl Into<String>,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: Secret<String>,
    ) -> Self {
        Self {
            region: region.into(),
            bucket: bucket.into(),
            access_key_id: access_key_id.into(),
            secret_access_key,
            url_ttl_secs: 3600,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Media store backed by S3 presigned requests.
pub struct S3MediaStore {
    config: S3MediaStoreConfig,
    client: Client,
}

impl S3MediaStore {
    pub fn new(config: S3MediaStoreConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self { config, client }
    }

    /// Virtual-hosted-style bucket host.
    fn host(&self) -> String {
        format!(
            "{}.s3.{}.amazonaws.com",
            self.config.bucket, self.config.region
        )
    }

    fn presign(&self, method: &str, key: &str, expires_secs: u64) -> String {
        presign_url(&PresignRequest {
            method,
            host: &self.host(),
            key,
            region: &self.config.region,
            access_key_id: &self.config.access_key_id,
            secret_access_key: self.config.secret_access_key.expose_secret(),
            expires_secs,
            now: Utc::now(),
        })
    }
}

#[async_trait]
impl MediaStore for S3MediaStore {
    async fn store(&self, bytes: &[u8], key: &str) -> Result<(), MediaStoreError> {
        let normalized = image_ops::normalize(bytes)
            .map_err(|e| MediaStoreError::WriteFailed(e.to_string()))?;

        let url = self.presign("PUT", key, INTERNAL_REQUEST_TTL_SECS);
        let response = self
            .client
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, "image/jpeg")
            .body(normalized)
            .send()
            .await
            .map_err(|e| MediaStoreError::WriteFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MediaStoreError::WriteFailed(format!(
                "provider returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn signed_url(&self, key: &str) -> Result<String, MediaStoreError> {
        if key.is_empty() {
            return Err(MediaStoreError::ReadFailed("empty storage key".into()));
        }
        Ok(self.presign("GET", key, self.config.url_ttl_secs))
    }

    async fn delete(&self, key: &str) -> Result<(), MediaStoreError> {
        let url = self.presign("DELETE", key, INTERNAL_REQUEST_TTL_SECS);
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| MediaStoreError::DeleteFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MediaStoreError::DeleteFailed(format!(
                "provider returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    fn key_from_signed_url(&self, url: &str) -> Result<String, MediaStoreError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|_| MediaStoreError::InvalidReference(url.to_string()))?;
        if parsed.host_str() != Some(self.host().as_str()) {
            return Err(MediaStoreError::InvalidReference(url.to_string()));
        }
        let key = parsed.path().trim_start_matches('/');
        if key.is_empty() {
            return Err(MediaStoreError::InvalidReference(url.to_string()));
        }
        Ok(key.to_string())
    }
}
