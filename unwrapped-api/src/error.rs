//! Error types for unwrapped-api

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use unwrapped_common::Error as CommonError;

/// API error type
///
/// Every variant renders as `{"error": <summary>, "details": <message>}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Year discovery failed (500)
    #[error("Failed to load years: {0}")]
    Years(#[source] CommonError),

    /// No collection file for the year (404)
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    /// Year token cannot name a collection file (400)
    #[error("Invalid year: {0}")]
    InvalidYear(String),

    /// Collection file unreadable or malformed (500)
    #[error("Failed to load collection: {0}")]
    Collection(#[source] CommonError),

    /// No record credits the artist (404)
    #[error("Artist not found: {0}")]
    ArtistNotFound(String),
}

impl ApiError {
    /// Classify a collection loading failure
    pub fn from_collection(err: CommonError) -> Self {
        match err {
            CommonError::CollectionNotFound(year) => ApiError::CollectionNotFound(year),
            CommonError::InvalidInput(msg) => ApiError::InvalidYear(msg),
            other => ApiError::Collection(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, summary, details) = match self {
            ApiError::Years(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load years",
                err.to_string(),
            ),
            ApiError::CollectionNotFound(year) => {
                (StatusCode::NOT_FOUND, "Collection not found", year)
            }
            ApiError::InvalidYear(msg) => (StatusCode::BAD_REQUEST, "Invalid year", msg),
            ApiError::Collection(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load collection",
                err.to_string(),
            ),
            ApiError::ArtistNotFound(name) => (StatusCode::NOT_FOUND, "Artist not found", name),
        };

        let body = Json(json!({
            "error": summary,
            "details": details,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_status_codes() {
        let years = ApiError::Years(CommonError::DirectoryNotFound(PathBuf::from("public")));
        assert_eq!(years.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let missing = ApiError::ArtistNotFound("Z".to_string());
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_from_collection_classifies_not_found() {
        let err = ApiError::from_collection(CommonError::CollectionNotFound("2001".to_string()));
        assert!(matches!(err, ApiError::CollectionNotFound(ref year) if year == "2001"));

        let err = ApiError::from_collection(CommonError::InvalidInput("a/b".to_string()));
        assert!(matches!(err, ApiError::InvalidYear(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = ApiError::from_collection(CommonError::Config("bad".to_string()));
        assert!(matches!(err, ApiError::Collection(_)));
    }
}
