/// Vehicle model and database operations
///
/// Vehicles are the inventory of the dealership. Anyone may read them; only
/// administrators may create, update or delete them (enforced by the API
/// layer, not here).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE vehicles (
///     id BIGSERIAL PRIMARY KEY,
///     brand VARCHAR(255) NOT NULL,
///     model VARCHAR(255) NOT NULL,
///     year INTEGER NOT NULL CHECK (year BETWEEN 1900 AND 2030),
///     price DOUBLE PRECISION NOT NULL CHECK (price >= 0 AND price <= 1000000000),
///     mileage INTEGER NOT NULL CHECK (mileage >= 0),
///     fuel_type VARCHAR(50) NOT NULL,
///     description TEXT,
///     image_urls TEXT[] NOT NULL DEFAULT '{}',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::{Validate, ValidationError};

/// Earliest model year accepted
pub const MIN_YEAR: i32 = 1900;

/// Latest model year accepted
pub const MAX_YEAR: i32 = 2030;

/// Highest asking price accepted
///
/// Below this bound a price with at most two decimals survives the round trip
/// through `f64` and `DOUBLE PRECISION` exactly.
pub const MAX_PRICE: f64 = 1_000_000_000.0;

/// A vehicle in the inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vehicle {
    /// Auto-incremented identifier
    pub id: i64,

    /// Manufacturer, e.g. "Toyota"
    pub brand: String,

    /// Model name, e.g. "Corolla"
    pub model: String,

    /// Model year
    pub year: i32,

    /// Asking price
    pub price: f64,

    /// Odometer reading in kilometres
    pub mileage: i32,

    /// Fuel type, free text ("Gasoline", "Diesel", "Electric", ...)
    pub fuel_type: String,

    /// Optional long-form description
    pub description: Option<String>,

    /// Image URLs in display order
    pub image_urls: Vec<String>,

    /// When the vehicle was listed
    pub created_at: DateTime<Utc>,

    /// When the listing was last modified
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or replacing a vehicle
///
/// Call [`Validate::validate`] before handing this to a store.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VehicleInput {
    #[validate(
        custom(function = "not_blank"),
        length(max = 255, message = "Must be at most 255 characters")
    )]
    pub brand: String,

    #[validate(
        custom(function = "not_blank"),
        length(max = 255, message = "Must be at most 255 characters")
    )]
    pub model: String,

    #[validate(range(min = 1900, max = 2030, message = "Year must be between 1900 and 2030"))]
    pub year: i32,

    #[validate(
        range(min = 0.0, max = 1_000_000_000.0, message = "Price must be between 0 and 1000000000"),
        custom(function = "whole_cents")
    )]
    pub price: f64,

    #[validate(range(min = 0, message = "Mileage must not be negative"))]
    pub mileage: i32,

    #[validate(
        custom(function = "not_blank"),
        length(max = 50, message = "Must be at most 50 characters")
    )]
    pub fuel_type: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Absent in the request body means "no images"
    #[serde(default)]
    pub image_urls: Vec<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Must not be blank".into());
        return Err(err);
    }
    Ok(())
}

fn whole_cents(price: f64) -> Result<(), ValidationError> {
    // Display never uses exponent notation and prints the shortest round-trip form
    let rendered = price.to_string();
    let decimals = rendered.split_once('.').map_or(0, |(_, fraction)| fraction.len());

    if decimals > 2 {
        let mut err = ValidationError::new("cents");
        err.message = Some("Price must have at most two decimal places".into());
        return Err(err);
    }
    Ok(())
}

/// Builds an `ILIKE` pattern matching `term` anywhere, with wildcards escaped
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl Vehicle {
    /// Lists vehicles ordered by id
    ///
    /// When `search` is given, only vehicles whose brand or model contains it
    /// (case-insensitive) are returned.
    pub async fn list(pool: &PgPool, search: Option<&str>) -> Result<Vec<Self>, sqlx::Error> {
        let vehicles = match search {
            Some(term) => {
                sqlx::query_as::<_, Vehicle>(
                    r#"
                    SELECT id, brand, model, year, price, mileage, fuel_type,
                           description, image_urls, created_at, updated_at
                    FROM vehicles
                    WHERE brand ILIKE $1 OR model ILIKE $1
                    ORDER BY id
                    "#,
                )
                .bind(contains_pattern(term))
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Vehicle>(
                    r#"
                    SELECT id, brand, model, year, price, mileage, fuel_type,
                           description, image_urls, created_at, updated_at
                    FROM vehicles
                    ORDER BY id
                    "#,
                )
                .fetch_all(pool)
                .await?
            }
        };

        Ok(vehicles)
    }

    /// Finds a vehicle by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT id, brand, model, year, price, mileage, fuel_type,
                   description, image_urls, created_at, updated_at
            FROM vehicles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(vehicle)
    }

    /// Inserts a new vehicle
    pub async fn create(pool: &PgPool, data: &VehicleInput) -> Result<Self, sqlx::Error> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (brand, model, year, price, mileage, fuel_type,
                                  description, image_urls)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, brand, model, year, price, mileage, fuel_type,
                      description, image_urls, created_at, updated_at
            "#,
        )
        .bind(&data.brand)
        .bind(&data.model)
        .bind(data.year)
        .bind(data.price)
        .bind(data.mileage)
        .bind(&data.fuel_type)
        .bind(&data.description)
        .bind(&data.image_urls)
        .fetch_one(pool)
        .await?;

        Ok(vehicle)
    }

    /// Replaces every mutable field of a vehicle
    ///
    /// Returns `None` if no vehicle has this ID.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: &VehicleInput,
    ) -> Result<Option<Self>, sqlx::Error> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET brand = $2, model = $3, year = $4, price = $5, mileage = $6,
                fuel_type = $7, description = $8, image_urls = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, brand, model, year, price, mileage, fuel_type,
                      description, image_urls, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&data.brand)
        .bind(&data.model)
        .bind(data.year)
        .bind(data.price)
        .bind(data.mileage)
        .bind(&data.fuel_type)
        .bind(&data.description)
        .bind(&data.image_urls)
        .fetch_optional(pool)
        .await?;

        Ok(vehicle)
    }

    /// Deletes a vehicle by ID
    ///
    /// Returns true if a row was removed.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
