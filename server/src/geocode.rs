//! # Geocoding proxy
//!
//! Forwards free-text location queries to a Nominatim-style geocoder and
//! maps the response down to the fields the add-spot form pre-fills.
//!
//! Degradation rules:
//! - queries shorter than [`MIN_QUERY_LEN`] never leave the server
//! - a malformed or non-array upstream body is "no suggestions", not an error
//! - entries with unparsable coordinates are skipped
//! - only transport failures bubble up, as [`AppError::Geocoder`] upstream
//!
//! [`AppError::Geocoder`]: crate::error::AppError::Geocoder

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const MIN_QUERY_LEN: usize = 3;
pub const MAX_SUGGESTIONS: usize = 5;
pub const USER_AGENT: &str = "TravelGuide/1.0";

/// What the form needs to pre-fill a submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceSuggestion {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: String,
    pub city: String,
}

/// One raw geocoder result. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
pub struct GeocodedPlace {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub address: PlaceAddress,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaceAddress {
    pub country: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub state: Option<String>,
    pub amenity: Option<String>,
    pub road: Option<String>,
}

pub async fn search_places(
    client: &Client,
    geocoder_url: &str,
    query: &str,
) -> Result<Vec<PlaceSuggestion>, reqwest::Error> {
    if query.trim().len() < MIN_QUERY_LEN {
        return Ok(Vec::new());
    }

    let limit = MAX_SUGGESTIONS.to_string();
    let response = client
        .get(geocoder_url)
        .query(&[
            ("format", "json"),
            ("q", query),
            ("limit", limit.as_str()),
            ("addressdetails", "1"),
        ])
        .send()
        .await?;

    let places: Vec<GeocodedPlace> = match response.json().await {
        Ok(places) => places,
        Err(e) => {
            warn!("Discarding malformed geocoder response: {e}");
            return Ok(Vec::new());
        }
    };

    Ok(places.iter().filter_map(suggestion_from_place).collect())
}

/// `None` when the entry has no usable coordinates.
pub fn suggestion_from_place(place: &GeocodedPlace) -> Option<PlaceSuggestion> {
    let latitude: f64 = place.lat.parse().ok()?;
    let longitude: f64 = place.lon.parse().ok()?;

    let name = place
        .address
        .amenity
        .clone()
        .or_else(|| place.address.road.clone())
        .unwrap_or_else(|| {
            place
                .display_name
                .split(',')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string()
        });

    let city = place
        .address
        .city
        .clone()
        .or_else(|| place.address.town.clone())
        .or_else(|| place.address.village.clone())
        .or_else(|| place.address.state.clone())
        .unwrap_or_default();

    Some(PlaceSuggestion {
        name,
        latitude,
        longitude,
        country: place.address.country.clone().unwrap_or_default(),
        city,
    })
}
