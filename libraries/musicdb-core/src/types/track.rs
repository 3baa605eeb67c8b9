//! Stored track document, normalized on read

use super::TrackKey;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

/// A track as read from the store.
///
/// This is the internal representation: it carries the storage key and the
/// audio file reference, neither of which may leave the service as-is. Use
/// [`crate::shape::shape_track`] to build the public form.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub key: TrackKey,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub genres: Vec<String>,
    pub release_date: Option<String>,
    pub audio_features: Map<String, Value>,
    pub sources: Map<String, Value>,
    pub date_added: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    /// Location of the audio file
    pub music_file: Option<String>,
}

impl Track {
    /// Create a track with only the required attributes set
    pub fn new(key: TrackKey, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            key,
            title: title.into(),
            artist: artist.into(),
            album: None,
            genres: Vec::new(),
            release_date: None,
            audio_features: Map::new(),
            sources: Map::new(),
            date_added: None,
            notes: None,
            music_file: None,
        }
    }
}

/// Parse a stored `date_added` value.
///
/// Accepts RFC 3339 and SQLite's `CURRENT_TIMESTAMP` layout (taken as UTC).
/// Anything else is not a timestamp and reads as `None`.
pub fn parse_date_added(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}
