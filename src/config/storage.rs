//! Object storage configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Object storage configuration (S3)
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// AWS region of the bucket
    pub region: String,

    /// Bucket holding restaurant images
    pub bucket: String,

    /// Access key id
    pub access_key_id: String,

    /// Secret access key
    pub secret_access_key: Secret<String>,

    /// Lifetime of signed retrieval URLs in seconds
    #[serde(default = "default_url_ttl")]
    pub url_ttl_secs: u64,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.region.is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE_REGION"));
        }
        if self.bucket.is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE_BUCKET"));
        }
        if self.access_key_id.is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE_ACCESS_KEY_ID"));
        }
        if self.secret_access_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE_SECRET_ACCESS_KEY"));
        }
        if self.url_ttl_secs == 0 {
            return Err(ValidationError::InvalidUrlTtl);
        }
        Ok(())
    }
}

/// 1 hour.
fn default_url_ttl() -> u64 {
    3600
}
