//! Collection and artist lookup endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tracing::{debug, error};
use unwrapped_common::{find_artist, load_collection, AlbumRecord, ArtistLinks};

use super::run_blocking;
use crate::{ApiError, AppState};

async fn load_year(state: &AppState, year: &str) -> Result<Vec<AlbumRecord>, ApiError> {
    let data_dir = state.data_dir.clone();
    let owned_year = year.to_string();

    run_blocking(move || load_collection(&data_dir, &owned_year))
        .await
        .map_err(|e| {
            let err = ApiError::from_collection(e);
            if let ApiError::Collection(ref source) = err {
                error!("Error loading collection {}: {}", year, source);
            }
            err
        })
}

/// GET /api/collection/:year
pub async fn get_collection(
    State(state): State<AppState>,
    Path(year): Path<String>,
) -> Result<Json<Vec<AlbumRecord>>, ApiError> {
    let records = load_year(&state, &year).await?;
    Ok(Json(records))
}

/// GET /api/collection/:year/artist/:name
///
/// Image and profile link from the first record crediting the artist.
pub async fn get_artist(
    State(state): State<AppState>,
    Path((year, name)): Path<(String, String)>,
) -> Result<Json<ArtistLinks>, ApiError> {
    let records = load_year(&state, &year).await?;

    match find_artist(&name, &records) {
        Some(links) => Ok(Json(links)),
        None => {
            debug!("Artist {:?} not in {} collection", name, year);
            Err(ApiError::ArtistNotFound(name))
        }
    }
}

/// Build collection routes
pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/api/collection/:year", get(get_collection))
        .route("/api/collection/:year/artist/:name", get(get_artist))
        .layer(CorsLayer::permissive())
}
