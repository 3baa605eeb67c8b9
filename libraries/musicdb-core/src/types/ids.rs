/// Identifier types for stored tracks
use std::fmt;

/// Key a stored track is addressed by.
///
/// Documents carrying an externally-assigned `music_id` are addressed by it.
/// Older documents without one fall back to the store's internal row id,
/// which is exposed only in its decimal string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrackKey {
    /// Externally-assigned `music_id`
    MusicId(String),
    /// Internal storage identifier
    Internal(i64),
}

impl TrackKey {
    /// Pick the authoritative key for a document.
    pub fn from_parts(music_id: Option<String>, internal_id: i64) -> Self {
        match music_id {
            Some(id) if !id.is_empty() => Self::MusicId(id),
            _ => Self::Internal(internal_id),
        }
    }

    /// Public string form of the key
    pub fn to_public_id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MusicId(id) => write!(f, "{}", id),
            Self::Internal(id) => write!(f, "{}", id),
        }
    }
}
