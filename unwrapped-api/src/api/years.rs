//! Year discovery endpoint
//!
//! Any origin may read the year list. The CORS headers are fixed and set on
//! every response, including errors and the pre-flight.

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::error;
use unwrapped_common::years;

use super::run_blocking;
use crate::{ApiError, AppState};

/// GET /api/years
///
/// Returns year tokens of all collection files, newest first.
pub async fn list_years(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let data_dir = state.data_dir.clone();

    let years = run_blocking(move || years::list_years(&data_dir))
        .await
        .map_err(|e| {
            error!("Error reading collection files: {}", e);
            ApiError::Years(e)
        })?;

    Ok(Json(years))
}

/// OPTIONS /api/years
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Build year discovery routes
pub fn years_routes() -> Router<AppState> {
    Router::new()
        .route("/api/years", get(list_years).options(preflight))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
}
