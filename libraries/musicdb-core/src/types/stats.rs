//! Aggregate catalog counts

use serde::{Deserialize, Serialize};

/// Summary returned by `GET /stats`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_tracks: u64,
    pub total_artists: u64,
    pub total_genres: u64,
}
