//! Search predicate construction
//!
//! HTTP filters are turned into a [`Predicate`] tree that storage backends
//! compile into their own query language. Filters only ever target the
//! lower-cased shadow fields, and needles are lower-cased here, so matching
//! is case-insensitive without relying on backend collation. Needles are
//! plain values: backends must bind them as parameters and match them as
//! literal substrings.

use crate::error::{CoreError, Result};

/// Lower-cased shadow fields stored alongside the canonical ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadowField {
    Title,
    Artist,
    Album,
    /// Scalar or list; matches when any element matches
    Genres,
}

impl ShadowField {
    /// Stored field name
    pub fn column(self) -> &'static str {
        match self {
            Self::Title => "title_lower",
            Self::Artist => "artist_lower",
            Self::Album => "album_lower",
            Self::Genres => "genres_lower",
        }
    }
}

/// Filter tree evaluated by a [`crate::TrackRepository`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Matches every track
    MatchAll,
    /// Field contains `needle` as an unanchored substring
    Contains { field: ShadowField, needle: String },
    /// At least one child matches
    AnyOf(Vec<Predicate>),
    /// Every child matches
    AllOf(Vec<Predicate>),
}

impl Predicate {
    fn contains(field: ShadowField, needle: &str) -> Self {
        Self::Contains {
            field,
            needle: needle.to_lowercase(),
        }
    }
}

/// Optional filters accepted by `GET /tracks`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackFilter {
    /// Free text matched against title, artist and album
    pub query: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<String>,
}

impl TrackFilter {
    /// Build a filter; empty strings count as absent
    pub fn new(query: Option<&str>, artist: Option<&str>, genre: Option<&str>) -> Self {
        fn present(value: Option<&str>) -> Option<String> {
            value.filter(|v| !v.is_empty()).map(str::to_string)
        }

        Self {
            query: present(query),
            artist: present(artist),
            genre: present(genre),
        }
    }

    /// Translate into a predicate.
    ///
    /// Present filters are combined with AND; the free-text clause is an OR
    /// over the title, artist and album shadows.
    pub fn to_predicate(&self) -> Predicate {
        let mut clauses = Vec::new();

        if let Some(query) = non_empty(self.query.as_deref()) {
            clauses.push(Predicate::AnyOf(vec![
                Predicate::contains(ShadowField::Title, query),
                Predicate::contains(ShadowField::Artist, query),
                Predicate::contains(ShadowField::Album, query),
            ]));
        }
        if let Some(artist) = non_empty(self.artist.as_deref()) {
            clauses.push(Predicate::contains(ShadowField::Artist, artist));
        }
        if let Some(genre) = non_empty(self.genre.as_deref()) {
            clauses.push(Predicate::contains(ShadowField::Genres, genre));
        }

        if clauses.is_empty() {
            Predicate::MatchAll
        } else {
            Predicate::AllOf(clauses)
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Result-count cap for searches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimit(u32);

impl SearchLimit {
    pub const DEFAULT: u32 = 50;
    pub const MAX: u32 = 500;

    /// Validate a requested limit.
    ///
    /// Out-of-range values are rejected rather than clamped.
    pub fn new(limit: u32) -> Result<Self> {
        if limit == 0 || limit > Self::MAX {
            return Err(CoreError::invalid_input(format!(
                "limit must be between 1 and {}, got {}",
                Self::MAX,
                limit
            )));
        }
        Ok(Self(limit))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for SearchLimit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<Option<u32>> for SearchLimit {
    type Error = CoreError;

    fn try_from(limit: Option<u32>) -> Result<Self> {
        limit.map_or_else(|| Ok(Self::default()), Self::new)
    }
}
