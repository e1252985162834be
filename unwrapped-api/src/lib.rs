//! unwrapped-api library
//!
//! HTTP surface for the collection viewer: year discovery, collection data,
//! artist lookup and static data files.

use axum::Router;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;

pub use crate::error::ApiError;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Directory holding `collection_<year>.json` files
    pub data_dir: PathBuf,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// Paths not matched by an API route are served from the data directory, so
/// `/collection_2024.json` returns the raw file.
pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.data_dir);

    Router::new()
        .merge(api::years_routes())
        .merge(api::collection_routes())
        .merge(api::health_routes())
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
