//! Artist lookup inside a collection

use serde::{Deserialize, Serialize};

use crate::collection::AlbumRecord;

/// Image and profile link of an artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistLinks {
    pub artist_image: Option<String>,
    pub artist_url: Option<String>,
}

/// Find the links of `name` in the first record crediting that artist
///
/// Matching is exact and case-sensitive. Later records crediting the same
/// artist are ignored.
pub fn find_artist(name: &str, collection: &[AlbumRecord]) -> Option<ArtistLinks> {
    collection
        .iter()
        .find(|record| record.artist.matches(name))
        .map(|record| ArtistLinks {
            artist_image: record.artist_image.clone(),
            artist_url: record.profile_url().map(str::to_string),
        })
}
