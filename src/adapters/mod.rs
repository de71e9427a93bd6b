//! Adapters - concrete implementations of the ports.

pub mod auth;
pub mod geocoding;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod s3;
