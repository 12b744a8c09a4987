use std::sync::Arc;

use axum::{
    extract::{Query, State as AxumState},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use spots::{NewSpot, Spot};
use tracing::info;

use crate::{
    database::{insert_spot, list_spots, SpotFilter},
    error::AppError,
    geocode::{search_places, PlaceSuggestion},
    state::State,
};

pub async fn health_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// `GET /spots` — every spot, newest first, optionally filtered.
pub async fn list_spots_handler(
    AxumState(state): AxumState<Arc<State>>,
    Query(filter): Query<SpotFilter>,
) -> Result<Json<Vec<Spot>>, AppError> {
    let spots = list_spots(&state.pool, &filter).await?;

    Ok(Json(spots))
}

/// `POST /spots` — store a submission, returning the created spot.
pub async fn create_spot_handler(
    AxumState(state): AxumState<Arc<State>>,
    Json(payload): Json<NewSpot>,
) -> Result<(StatusCode, Json<Spot>), AppError> {
    payload.validate()?;

    let spot = insert_spot(&state.pool, &payload).await?;
    info!(spot = %spot.name, id = %spot.id, "spot created");

    Ok((StatusCode::CREATED, Json(spot)))
}

#[derive(Deserialize)]
pub struct GeocodeQuery {
    #[serde(default)]
    pub q: String,
}

/// `GET /geocode?q=...` — place suggestions for the add-spot form.
pub async fn geocode_handler(
    AxumState(state): AxumState<Arc<State>>,
    Query(query): Query<GeocodeQuery>,
) -> Result<Json<Vec<PlaceSuggestion>>, AppError> {
    let suggestions = search_places(&state.geocoder, &state.config.geocoder_url, &query.q).await?;

    Ok(Json(suggestions))
}
