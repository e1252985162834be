//! # Unwrapped Common Library
//!
//! Shared code for the Unwrapped collection service:
//! - Collection data model (album records, collection files)
//! - Year discovery over a data directory
//! - Artist lookup inside a collection
//! - Configuration resolution
//! - Common error types

pub mod artist;
pub mod collection;
pub mod config;
pub mod error;
pub mod years;

pub use artist::{find_artist, ArtistLinks};
pub use collection::{load_collection, AlbumRecord, ArtistField};
pub use error::{Error, Result};
pub use years::list_years;
