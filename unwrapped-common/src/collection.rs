//! Collection data model
//!
//! A collection is the list of releases added during one year. Each year lives
//! in its own `collection_<year>.json` file inside the data directory. File
//! contents are produced out of band; this module only names, reads and
//! parses them.

use std::fs;
use std::path::Path;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{Error, Result};

/// Literal prefix of every collection file name
pub const COLLECTION_PREFIX: &str = "collection_";

/// Literal suffix of every collection file name
pub const COLLECTION_SUFFIX: &str = ".json";

/// A collection file discovered in the data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionFile {
    /// Text between the prefix and the suffix, nominally a year
    pub year: String,
}

impl CollectionFile {
    /// Recognize a collection file by name
    ///
    /// Returns `None` unless the name starts with `collection_` and ends with
    /// `.json`. The year token is not validated.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let year = file_name
            .strip_prefix(COLLECTION_PREFIX)?
            .strip_suffix(COLLECTION_SUFFIX)?;

        Some(Self {
            year: year.to_string(),
        })
    }

    /// File name holding the collection for `year`
    pub fn file_name_for(year: &str) -> String {
        format!("{}{}{}", COLLECTION_PREFIX, year, COLLECTION_SUFFIX)
    }
}

/// Artist credit of a release: one name or several
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArtistField {
    Single(String),
    Multiple(Vec<String>),
}

impl ArtistField {
    /// Exact, case-sensitive match against any credited name
    pub fn matches(&self, name: &str) -> bool {
        match self {
            ArtistField::Single(artist) => artist == name,
            ArtistField::Multiple(artists) => artists.iter().any(|artist| artist == name),
        }
    }
}

/// Physical format of a release (e.g. 2x Vinyl, LP, Album)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseFormat {
    #[serde(default = "default_format_name")]
    pub name: String,
    #[serde(default = "default_format_qty")]
    pub qty: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub descriptions: Vec<String>,
}

fn default_format_name() -> String {
    "Unknown Format".to_string()
}

fn default_format_qty() -> String {
    "1".to_string()
}

/// Artist profile link of a record
///
/// The collection generator writes `artist_uri`, the viewer reads
/// `artist_url`. Either key is accepted (`artist_url` wins when both are
/// present) and the link is always written back as `artist_url`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileLink(pub Option<String>);

impl ProfileLink {
    pub fn get(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[derive(Deserialize)]
struct ProfileLinkKeys {
    #[serde(default)]
    artist_url: Option<String>,
    #[serde(default)]
    artist_uri: Option<String>,
}

#[derive(Serialize)]
struct ProfileLinkOut<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    artist_url: Option<&'a str>,
}

impl<'de> Deserialize<'de> for ProfileLink {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let keys = ProfileLinkKeys::deserialize(deserializer)?;
        Ok(ProfileLink(keys.artist_url.or(keys.artist_uri)))
    }
}

impl Serialize for ProfileLink {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ProfileLinkOut {
            artist_url: self.get(),
        }
        .serialize(serializer)
    }
}

/// One release in a collection
///
/// Only `artist` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub artist: ArtistField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<DateTime<FixedOffset>>,
    /// Release year, not the year the record was added
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default)]
    pub formats: Vec<ReleaseFormat>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_uri: Option<String>,
    /// `artist_url` / `artist_uri`; must stay ahead of `extra`
    #[serde(flatten)]
    pub artist_url: ProfileLink,
    /// Fields not modeled above, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AlbumRecord {
    /// Record with only the fields artist lookup cares about
    pub fn new(artist: ArtistField, artist_image: Option<&str>, artist_url: Option<&str>) -> Self {
        Self {
            id: None,
            title: None,
            artist,
            date_added: None,
            year: None,
            formats: Vec::new(),
            labels: Vec::new(),
            genres: Vec::new(),
            styles: Vec::new(),
            cover_image: None,
            artist_image: artist_image.map(str::to_string),
            album_uri: None,
            artist_url: ProfileLink(artist_url.map(str::to_string)),
            extra: Map::new(),
        }
    }

    /// Artist profile link
    pub fn profile_url(&self) -> Option<&str> {
        self.artist_url.get()
    }
}

/// Read and parse the collection for `year` from `directory`
///
/// `year` usually comes straight from a request path, so tokens containing a
/// path separator are rejected before touching the filesystem.
pub fn load_collection(directory: &Path, year: &str) -> Result<Vec<AlbumRecord>> {
    if year.contains(['/', '\\']) {
        return Err(Error::InvalidInput(format!("Invalid year token: {:?}", year)));
    }

    let path = directory.join(CollectionFile::file_name_for(year));
    if !path.is_file() {
        return Err(Error::CollectionNotFound(year.to_string()));
    }

    let contents = fs::read_to_string(&path)?;
    let records: Vec<AlbumRecord> = serde_json::from_str(&contents)?;

    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
