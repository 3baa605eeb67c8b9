use crate::error::Result as StorageResult;
use crate::{artists, genres, tracks};
use async_trait::async_trait;
use musicdb_core::{error::Result, Predicate, SearchLimit, Track, TrackRepository};
use sqlx::SqlitePool;

/// Track repository backed by `SQLite`
#[derive(Clone)]
pub struct SqliteTrackRepository {
    pool: SqlitePool,
}

impl SqliteTrackRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for `database_url` and bring the schema up to date
    pub async fn connect(database_url: &str) -> StorageResult<Self> {
        let pool = crate::create_pool(database_url).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TrackRepository for SqliteTrackRepository {
    async fn search(&self, predicate: &Predicate, limit: SearchLimit) -> Result<Vec<Track>> {
        tracks::search(&self.pool, predicate, limit).await
    }

    async fn get_by_key(&self, key: &str) -> Result<Option<Track>> {
        tracks::get_by_key(&self.pool, key).await
    }

    async fn list_distinct_artists(&self) -> Result<Vec<String>> {
        artists::list_distinct(&self.pool).await
    }

    async fn list_distinct_genres(&self) -> Result<Vec<String>> {
        genres::list_distinct(&self.pool).await
    }

    async fn count_all(&self) -> Result<u64> {
        tracks::count_all(&self.pool).await
    }

    async fn count_distinct_artists(&self) -> Result<u64> {
        artists::count_distinct(&self.pool).await
    }

    async fn count_distinct_genres(&self) -> Result<u64> {
        genres::count_distinct(&self.pool).await
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
