//! # Spots
//!
//! Shared travel spot model, used by the server, the camera library, and the
//! seeder so every crate agrees on one schema.
//!
//! ## Wire format
//! - JSON field names are camelCase (`createdAt`, `updatedAt`) to match the
//!   frontend payloads
//! - `category` serializes as its upper-case tag (`"LANDMARKS"`)
//! - `id` and both timestamps are assigned by the storage layer, so the
//!   submission payload ([`NewSpot`]) carries neither

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// A point of interest on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: String,
    pub city: String,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Spot tag used for filtering. Open to extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "category", rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Landmarks,
    Nature,
    Beach,
    Restaurants,
    Other,
}

/// A user submission: a [`Spot`] minus id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSpot {
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: String,
    pub city: String,
    pub category: Category,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InvalidSpot {
    #[error("Field cannot be empty: {0}")]
    EmptyField(&'static str),

    #[error("Latitude out of range: {0}")]
    LatitudeRange(String),

    #[error("Longitude out of range: {0}")]
    LongitudeRange(String),
}

impl NewSpot {
    /// Input constraints for submissions. Coordinates outside their valid
    /// ranges never reach the store or the camera.
    pub fn validate(&self) -> Result<(), InvalidSpot> {
        for (value, field) in [
            (&self.name, "name"),
            (&self.description, "description"),
            (&self.country, "country"),
            (&self.city, "city"),
        ] {
            if value.trim().is_empty() {
                return Err(InvalidSpot::EmptyField(field));
            }
        }

        if !(LATITUDE_RANGE.0..=LATITUDE_RANGE.1).contains(&self.latitude)
            || !self.latitude.is_finite()
        {
            return Err(InvalidSpot::LatitudeRange(self.latitude.to_string()));
        }

        if !(LONGITUDE_RANGE.0..=LONGITUDE_RANGE.1).contains(&self.longitude)
            || !self.longitude.is_finite()
        {
            return Err(InvalidSpot::LongitudeRange(self.longitude.to_string()));
        }

        Ok(())
    }
}
