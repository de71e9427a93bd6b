//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `UserRepository` - credential store (email uniqueness lives here)
//! - `RestaurantRepository` - listing persistence with pagination/search
//! - `TokenService` - access/refresh token issuance and verification
//! - `PasswordHasher` - adaptive one-way password hashing
//! - `Geocoder` - postal address to coordinates
//! - `MediaStore` - durable image storage with time-limited retrieval URLs

mod geocoder;
mod media_store;
mod password_hasher;
mod restaurant_repository;
mod token_service;
mod user_repository;

pub use geocoder::{GeocodeError, Geocoder};
pub use media_store::{MediaStore, MediaStoreError};
pub use password_hasher::PasswordHasher;
pub use restaurant_repository::{ListScope, RestaurantPage, RestaurantRepository};
pub use token_service::{TokenError, TokenService};
pub use user_repository::UserRepository;
