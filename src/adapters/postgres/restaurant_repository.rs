//! PostgreSQL implementation of RestaurantRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, PageRequest, RestaurantId, Timestamp, UserId};
use crate::domain::restaurant::{Coordinates, Restaurant};
use crate::ports::{ListScope, RestaurantPage, RestaurantRepository};

/// PostgreSQL implementation of RestaurantRepository.
#[derive(Clone)]
pub struct PostgresRestaurantRepository {
    pool: PgPool,
}

impl PostgresRestaurantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, name, categories, description, address, city, pin_code, \
     latitude, longitude, phone_number, website, opening_time, closing_time, \
     images, offers_delivery, offers_dine_in, offers_pickup, user_id, created_at, updated_at";

/// ILIKE pattern matching `needle` anywhere in the haystack.
fn search_pattern(needle: &str) -> String {
    format!("%{}%", needle)
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

fn row_to_restaurant(row: sqlx::postgres::PgRow) -> Result<Restaurant, DomainError> {
    let map_err = |e: sqlx::Error| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to read restaurant row: {}", e),
        )
    };
    let latitude: f64 = row.try_get("latitude").map_err(map_err)?;
    let longitude: f64 = row.try_get("longitude").map_err(map_err)?;
    let coordinates = Coordinates::new(latitude, longitude).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            "stored coordinates are out of bounds",
        )
    })?;

    Ok(Restaurant {
        id: RestaurantId::from_uuid(row.try_get::<Uuid, _>("id").map_err(map_err)?),
        name: row.try_get("name").map_err(map_err)?,
        categories: row.try_get("categories").map_err(map_err)?,
        description: row.try_get("description").map_err(map_err)?,
        address: row.try_get("address").map_err(map_err)?,
        city: row.try_get("city").map_err(map_err)?,
        pin_code: row.try_get("pin_code").map_err(map_err)?,
        coordinates,
        phone_number: row.try_get("phone_number").map_err(map_err)?,
        website: row.try_get("website").map_err(map_err)?,
        opening_time: row.try_get("opening_time").map_err(map_err)?,
        closing_time: row.try_get("closing_time").map_err(map_err)?,
        images: row.try_get("images").map_err(map_err)?,
        offers_delivery: row.try_get("offers_delivery").map_err(map_err)?,
        offers_dine_in: row.try_get("offers_dine_in").map_err(map_err)?,
        offers_pickup: row.try_get("offers_pickup").map_err(map_err)?,
        owner_id: UserId::from_uuid(row.try_get::<Uuid, _>("user_id").map_err(map_err)?),
        created_at: Timestamp::from_datetime(row.try_get("created_at").map_err(map_err)?),
        updated_at: Timestamp::from_datetime(row.try_get("updated_at").map_err(map_err)?),
    })
}

#[async_trait]
impl RestaurantRepository for PostgresRestaurantRepository {
    async fn insert(&self, restaurant: &Restaurant) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO restaurants (
                id, name, categories, description, address, city, pin_code,
                latitude, longitude, phone_number, website, opening_time, closing_time,
                images, offers_delivery, offers_dine_in, offers_pickup, user_id,
                created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20
            )
            "#,
        )
        .bind(restaurant.id.as_uuid())
        .bind(&restaurant.name)
        .bind(&restaurant.categories)
        .bind(&restaurant.description)
        .bind(&restaurant.address)
        .bind(&restaurant.city)
        .bind(&restaurant.pin_code)
        .bind(restaurant.coordinates.latitude())
        .bind(restaurant.coordinates.longitude())
        .bind(&restaurant.phone_number)
        .bind(&restaurant.website)
        .bind(&restaurant.opening_time)
        .bind(&restaurant.closing_time)
        .bind(&restaurant.images)
        .bind(restaurant.offers_delivery)
        .bind(restaurant.offers_dine_in)
        .bind(restaurant.offers_pickup)
        .bind(restaurant.owner_id.as_uuid())
        .bind(restaurant.created_at.as_datetime())
        .bind(restaurant.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert restaurant", e))?;

        Ok(())
    }

    async fn update(&self, restaurant: &Restaurant) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE restaurants SET
                name = $2,
                categories = $3,
                description = $4,
                address = $5,
                city = $6,
                pin_code = $7,
                latitude = $8,
                longitude = $9,
                phone_number = $10,
                website = $11,
                opening_time = $12,
                closing_time = $13,
                images = $14,
                offers_delivery = $15,
                offers_dine_in = $16,
                offers_pickup = $17,
                updated_at = $18
            WHERE id = $1
            "#,
        )
        .bind(restaurant.id.as_uuid())
        .bind(&restaurant.name)
        .bind(&restaurant.categories)
        .bind(&restaurant.description)
        .bind(&restaurant.address)
        .bind(&restaurant.city)
        .bind(&restaurant.pin_code)
        .bind(restaurant.coordinates.latitude())
        .bind(restaurant.coordinates.longitude())
        .bind(&restaurant.phone_number)
        .bind(&restaurant.website)
        .bind(&restaurant.opening_time)
        .bind(&restaurant.closing_time)
        .bind(&restaurant.images)
        .bind(restaurant.offers_delivery)
        .bind(restaurant.offers_dine_in)
        .bind(restaurant.offers_pickup)
        .bind(restaurant.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update restaurant", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::RestaurantNotFound,
                format!("Restaurant not found: {}", restaurant.id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &RestaurantId) -> Result<Option<Restaurant>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM restaurants WHERE id = $1",
            COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch restaurant", e))?;

        row.map(row_to_restaurant).transpose()
    }

    async fn delete(&self, id: &RestaurantId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete restaurant", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::RestaurantNotFound,
                format!("Restaurant not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn list(
        &self,
        scope: ListScope,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<RestaurantPage, DomainError> {
        let owner: Option<Uuid> = match scope {
            ListScope::Owner(user_id) => Some(*user_id.as_uuid()),
            ListScope::Public => None,
        };
        let pattern = search.map(search_pattern);

        const FILTER: &str = r#"
            ($1::uuid IS NULL OR user_id = $1)
            AND (
                $2::text IS NULL
                OR name ILIKE $2
                OR city ILIKE $2
                OR EXISTS (SELECT 1 FROM unnest(categories) AS category WHERE category ILIKE $2)
            )
        "#;

        let total: (i64,) = sqlx::query_as(&format!(
            "SELECT COUNT(*) FROM restaurants WHERE {}",
            FILTER
        ))
        .bind(owner)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count restaurants", e))?;

        let rows = sqlx::query(&format!(
            "SELECT {} FROM restaurants WHERE {} ORDER BY created_at DESC LIMIT $3 OFFSET $4",
            COLUMNS, FILTER
        ))
        .bind(owner)
        .bind(&pattern)
        .bind(i64::from(page.limit))
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list restaurants", e))?;

        let restaurants = rows
            .into_iter()
            .map(row_to_restaurant)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RestaurantPage {
            restaurants,
            total: total.0 as u64,
        })
    }
}
