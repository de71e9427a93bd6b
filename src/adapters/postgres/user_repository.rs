//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let map_err = |e: sqlx::Error| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to read user row: {}", e),
        )
    };
    Ok(User {
        id: UserId::from_uuid(row.try_get::<Uuid, _>("id").map_err(map_err)?),
        email: row.try_get("email").map_err(map_err)?,
        password_hash: row.try_get("password_hash").map_err(map_err)?,
        created_at: Timestamp::from_datetime(row.try_get("created_at").map_err(map_err)?),
    })
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, DomainError> {
        let user = User {
            id: UserId::new(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Timestamp::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // The unique index closes the check-then-insert race.
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                DomainError::new(
                    ErrorCode::DuplicateEmail,
                    format!("email already registered: {}", user.email),
                )
            } else {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to insert user: {}", e),
                )
            }
        })?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch user: {}", e),
            )
        })?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row =
            sqlx::query("SELECT id, email, password_hash, created_at FROM users WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to fetch user: {}", e),
                    )
                })?;

        row.map(row_to_user).transpose()
    }
}
