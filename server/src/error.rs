use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidSpot(#[from] spots::InvalidSpot),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Geocoder unreachable: {0}")]
    Geocoder(#[from] reqwest::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidSpot { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Geocoder { .. } => StatusCode::BAD_GATEWAY,
        };

        (status, self.to_string()).into_response()
    }
}
