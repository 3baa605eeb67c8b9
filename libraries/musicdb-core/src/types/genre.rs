//! Genre field as found in stored documents

use serde::Deserialize;

/// Raw `genres` value of a stored document.
///
/// Legacy records hold a single string, current ones a list. Rows are
/// normalized through this type as soon as they are read; nothing past the
/// storage boundary sees the scalar form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum GenreField {
    One(String),
    Many(Vec<String>),
    Absent,
}

impl GenreField {
    /// Parse the JSON text stored in a `genres` column.
    ///
    /// A missing column reads as [`GenreField::Absent`].
    pub fn from_json(raw: Option<&str>) -> serde_json::Result<Self> {
        match raw {
            Some(text) => serde_json::from_str(text),
            None => Ok(Self::Absent),
        }
    }

    /// Normalize to the list shape used everywhere else, dropping blank entries
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(genre) if genre.is_empty() => Vec::new(),
            Self::One(genre) => vec![genre],
            Self::Many(genres) => genres.into_iter().filter(|g| !g.is_empty()).collect(),
            Self::Absent => Vec::new(),
        }
    }
}

impl From<GenreField> for Vec<String> {
    fn from(field: GenreField) -> Self {
        field.into_vec()
    }
}
