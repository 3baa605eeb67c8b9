//! Repository trait over the track collection

use crate::error::Result;
use crate::query::{Predicate, SearchLimit};
use crate::types::{CatalogStats, Track};
use async_trait::async_trait;

/// Read-only access to the track collection.
///
/// Implementations own their connection handle; one instance is created at
/// startup and shared by all requests.
#[async_trait]
pub trait TrackRepository: Send + Sync {
    /// Tracks matching `predicate`, at most `limit` of them, in store order
    async fn search(&self, predicate: &Predicate, limit: SearchLimit) -> Result<Vec<Track>>;

    /// Track addressed by `key` (its `music_id`, or internal id when it has none)
    async fn get_by_key(&self, key: &str) -> Result<Option<Track>>;

    /// Distinct non-empty artists, ascending
    async fn list_distinct_artists(&self) -> Result<Vec<String>>;

    /// Distinct genres across scalar and list records, ascending
    async fn list_distinct_genres(&self) -> Result<Vec<String>>;

    async fn count_all(&self) -> Result<u64>;

    async fn count_distinct_artists(&self) -> Result<u64>;

    async fn count_distinct_genres(&self) -> Result<u64>;

    /// Release the underlying connection handle
    async fn close(&self);

    /// All three counts for the stats summary
    async fn stats(&self) -> Result<CatalogStats> {
        Ok(CatalogStats {
            total_tracks: self.count_all().await?,
            total_artists: self.count_distinct_artists().await?,
            total_genres: self.count_distinct_genres().await?,
        })
    }
}
