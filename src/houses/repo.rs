use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::HouseInput;

/// A house listing. The same shape backs both the `houses` and the
/// `rent_houses` tables.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct House {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathroom: Option<i32>,
    pub room: Option<i32>,
    pub rent: Option<i32>,
    pub available: Option<bool>,
    pub picture: Option<String>,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

const HOUSE_COLUMNS: &str = "id, name, email, number, address, city, bedrooms, bathroom, room, \
                             rent, available, picture, description, created_at";

impl House {
    pub async fn list(db: &PgPool) -> Result<Vec<House>, sqlx::Error> {
        sqlx::query_as::<_, House>(&format!(
            "SELECT {HOUSE_COLUMNS} FROM houses ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await
    }

    pub async fn get(db: &PgPool, id: Uuid) -> Result<Option<House>, sqlx::Error> {
        sqlx::query_as::<_, House>(&format!(
            "SELECT {HOUSE_COLUMNS} FROM houses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn create(db: &PgPool, input: &HouseInput) -> Result<House, sqlx::Error> {
        sqlx::query_as::<_, House>(&format!(
            "INSERT INTO houses \
             (name, email, number, address, city, bedrooms, bathroom, room, \
              rent, available, picture, description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {HOUSE_COLUMNS}"
        ))
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.number)
        .bind(&input.address)
        .bind(&input.city)
        .bind(input.bedrooms)
        .bind(input.bathroom)
        .bind(input.room)
        .bind(input.rent)
        .bind(input.available)
        .bind(&input.picture)
        .bind(&input.description)
        .fetch_one(db)
        .await
    }

    /// Partial update: absent fields keep their stored value.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        input: &HouseInput,
    ) -> Result<Option<House>, sqlx::Error> {
        sqlx::query_as::<_, House>(&format!(
            "UPDATE houses SET \
             name = COALESCE($2, name), \
             email = COALESCE($3, email), \
             number = COALESCE($4, number), \
             address = COALESCE($5, address), \
             city = COALESCE($6, city), \
             bedrooms = COALESCE($7, bedrooms), \
             bathroom = COALESCE($8, bathroom), \
             room = COALESCE($9, room), \
             rent = COALESCE($10, rent), \
             available = COALESCE($11, available), \
             picture = COALESCE($12, picture), \
             description = COALESCE($13, description) \
             WHERE id = $1 \
             RETURNING {HOUSE_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.number)
        .bind(&input.address)
        .bind(&input.city)
        .bind(input.bedrooms)
        .bind(input.bathroom)
        .bind(input.room)
        .bind(input.rent)
        .bind(input.available)
        .bind(&input.picture)
        .bind(&input.description)
        .fetch_optional(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> Result<Option<House>, sqlx::Error> {
        sqlx::query_as::<_, House>(&format!(
            "DELETE FROM houses WHERE id = $1 RETURNING {HOUSE_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn list_rentals(db: &PgPool) -> Result<Vec<House>, sqlx::Error> {
        sqlx::query_as::<_, House>(&format!(
            "SELECT {HOUSE_COLUMNS} FROM rent_houses ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await
    }

    pub async fn create_rental(db: &PgPool, input: &HouseInput) -> Result<House, sqlx::Error> {
        sqlx::query_as::<_, House>(&format!(
            "INSERT INTO rent_houses \
             (name, email, number, address, city, bedrooms, bathroom, room, \
              rent, available, picture, description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {HOUSE_COLUMNS}"
        ))
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.number)
        .bind(&input.address)
        .bind(&input.city)
        .bind(input.bedrooms)
        .bind(input.bathroom)
        .bind(input.room)
        .bind(input.rent)
        .bind(input.available)
        .bind(&input.picture)
        .bind(&input.description)
        .fetch_one(db)
        .await
    }
}
