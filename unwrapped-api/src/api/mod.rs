//! HTTP API handlers for unwrapped-api

pub mod collection;
pub mod health;
pub mod years;

pub use collection::collection_routes;
pub use health::health_routes;
pub use years::years_routes;

use unwrapped_common::{Error, Result};

/// Run blocking filesystem work off the async runtime
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?
}
