//! Public response shape for tracks

use crate::types::Track;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Track as exposed to clients.
///
/// This struct is the allow-list: only the fields declared here are ever
/// serialized. Optional fields serialize as `null` rather than being omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackResponse {
    pub music_id: String,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub genres: Vec<String>,
    pub release_date: Option<String>,
    pub audio_features: Map<String, Value>,
    pub sources: Map<String, Value>,
    /// ISO-8601 in UTC
    pub date_added: Option<String>,
    pub notes: Option<String>,
}

impl From<&Track> for TrackResponse {
    fn from(track: &Track) -> Self {
        Self {
            music_id: track.key.to_public_id(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            genres: track.genres.clone(),
            release_date: track.release_date.clone(),
            audio_features: track.audio_features.clone(),
            sources: track.sources.clone(),
            date_added: track
                .date_added
                .map(|ts| ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            notes: track.notes.clone(),
        }
    }
}

impl From<Track> for TrackResponse {
    fn from(track: Track) -> Self {
        Self::from(&track)
    }
}

/// Shape an optional track; a missing track stays missing
pub fn shape_track(track: Option<&Track>) -> Option<TrackResponse> {
    track.map(TrackResponse::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TrackKey;
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;

    fn sample_track() -> Track {
        let mut track = Track::new(TrackKey::Internal(17), "Blue Moon", "Artist A");
        track.genres = vec!["jazz".to_string(), "pop".to_string()];
        track.music_file = Some("/srv/music/blue_moon.mp3".to_string());
        track
    }

    #[test]
    fn test_none_shapes_to_none() {
        assert_eq!(shape_track(None), None);
    }

    #[test]
    fn test_internal_key_is_exposed_as_string() {
        let shaped = shape_track(Some(&sample_track())).unwrap();
        assert_eq!(shaped.music_id, "17");
    }

    #[test]
    fn test_serialized_keys_are_exactly_the_public_fields() {
        let value = serde_json::to_value(TrackResponse::from(sample_track())).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();

        assert_eq!(
            keys,
            vec![
                "album",
                "artist",
                "audio_features",
                "date_added",
                "genres",
                "music_id",
                "notes",
                "release_date",
                "sources",
                "title",
            ]
        );
        assert!(!value.to_string().contains("blue_moon.mp3"));
    }

    #[test]
    fn test_defaults_are_empty_not_null() {
        let track = Track::new(TrackKey::MusicId("m-1".to_string()), "Red Sun", "Artist B");
        let value = serde_json::to_value(TrackResponse::from(&track)).unwrap();

        assert_eq!(value["genres"], json!([]));
        assert_eq!(value["audio_features"], json!({}));
        assert_eq!(value["sources"], json!({}));
        assert_eq!(value["album"], Value::Null);
        assert_eq!(value["date_added"], Value::Null);
    }

    #[test]
    fn test_date_added_round_trips_as_iso8601() {
        let added = Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap();
        let mut track = sample_track();
        track.date_added = Some(added);

        let shaped = TrackResponse::from(&track);
        let rendered = shaped.date_added.unwrap();

        assert_eq!(rendered, "2024-01-05T10:00:00Z");
        assert_eq!(
            DateTime::parse_from_rfc3339(&rendered).unwrap().with_timezone(&Utc),
            added
        );
    }

    #[test]
    fn test_date_added_keeps_subsecond_precision() {
        let added = Utc.timestamp_millis_opt(1_704_448_800_250).unwrap();
        let mut track = sample_track();
        track.date_added = Some(added);

        let rendered = TrackResponse::from(&track).date_added.unwrap();
        assert_eq!(rendered, "2024-01-05T10:00:00.250Z");
    }
}
