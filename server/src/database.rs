//! # Postgres
//!
//! Relational store for spots.
//!
//! ## Schema
//! - `travel_spots` table, one row per spot
//! - `category` Postgres enum mirroring [`spots::Category`]
//! - `created_at DESC` index; the list endpoint always returns newest first
//! - `id` and both timestamps are assigned here, never by the client
//!
//! Spots are write-once through this API: created on submission, read in
//! bulk, never updated or deleted (the seeder clears the table out-of-band),
//! so `updated_at` is set together with `created_at`.

use serde::Deserialize;
use spots::{Category, NewSpot, Spot};
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;
use uuid::Uuid;

/// Optional narrowing of the spot list, straight from the list panel's
/// filter controls.
#[derive(Debug, Default, Deserialize)]
pub struct SpotFilter {
    pub category: Option<Category>,
    pub country: Option<String>,
    pub q: Option<String>,
}

pub async fn init_postgres(database_url: &str) -> PgPool {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .expect("Database unreachable!");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Migrations failed!");

    info!("Database ready");
    pool
}

pub async fn list_spots(pool: &PgPool, filter: &SpotFilter) -> Result<Vec<Spot>, sqlx::Error> {
    sqlx::query_as::<_, Spot>(
        r#"
        SELECT id, name, description, latitude, longitude, country, city,
               category, created_at, updated_at
        FROM travel_spots
        WHERE ($1 IS NULL OR category = $1)
          AND ($2::text IS NULL OR country ILIKE $2)
          AND ($3::text IS NULL
               OR name ILIKE '%' || $3 || '%'
               OR city ILIKE '%' || $3 || '%'
               OR country ILIKE '%' || $3 || '%')
        ORDER BY created_at DESC
        "#,
    )
    .bind(filter.category)
    .bind(filter.country.as_deref())
    .bind(filter.q.as_deref())
    .fetch_all(pool)
    .await
}

pub async fn insert_spot(pool: &PgPool, spot: &NewSpot) -> Result<Spot, sqlx::Error> {
    sqlx::query_as::<_, Spot>(
        r#"
        INSERT INTO travel_spots
            (id, name, description, latitude, longitude, country, city, category)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, name, description, latitude, longitude, country, city,
                  category, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&spot.name)
    .bind(&spot.description)
    .bind(spot.latitude)
    .bind(spot.longitude)
    .bind(&spot.country)
    .bind(&spot.city)
    .bind(spot.category)
    .fetch_one(pool)
    .await
}

pub async fn clear_spots(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM travel_spots")
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
