//! PostgreSQL adapters.

mod restaurant_repository;
mod user_repository;

pub use restaurant_repository::PostgresRestaurantRepository;
pub use user_repository::PostgresUserRepository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Builds the connection pool and applies pending migrations.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect(&config.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
