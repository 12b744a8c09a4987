//! # Travel Spots API
//!
//! Backend for the travel spots map: a thin CRUD layer over Postgres plus a
//! geocoding proxy for the add-spot form.
//!
//! # General Infrastructure
//! - Frontend talks to this server only; Postgres and the geocoder are never
//!   exposed directly
//! - `GET /spots` returns the full list newest first, optionally narrowed by
//!   `category`, `country`, or a free-text `q`
//! - `POST /spots` validates and stores a submission
//! - `GET /geocode` forwards a free-text query to the geocoder and maps the
//!   response down to the handful of fields the form pre-fills
//!
//! ## Geocoder proxy
//! The form could call the geocoder from the browser. Proxying instead keeps
//! the upstream URL and rate limits in one place, lets us degrade malformed
//! responses to "no suggestions" uniformly, and gives the frontend one
//! origin to talk to.
//!
//! # Setup
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```
//!
//! Run against a local database.
//! ```sh
//! DATABASE_URL=postgres://localhost:5432/spots cargo run -p server
//! ```
//!
//! Seed the fixture locations.
//! ```sh
//! cargo run -p seeder
//! ```

use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};

use signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod database;
pub mod error;
pub mod geocode;
pub mod routes;
pub mod state;

use routes::{create_spot_handler, geocode_handler, health_handler, list_spots_handler};
use state::State;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    dotenvy::dotenv().ok();

    info!("Initializing state...");
    let state = State::new().await;

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/spots", get(list_spots_handler).post(create_spot_handler))
        .route("/geocode", get(geocode_handler))
        .layer(cors)
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
