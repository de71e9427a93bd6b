//! S3 media store adapter.
//!
//! Talks to S3 through presigned requests only: uploads and deletes go
//! over plain HTTP against presigned URLs, retrieval URLs are handed to
//! clients directly. No AWS SDK involved; signing is a small, fixed
//! SigV4 derivation over HMAC-SHA256.

mod image_ops;
mod media_store;
mod sigv4;

pub use media_store::{S3MediaStore, S3MediaStoreConfig};
