//! musicdb Storage
//!
//! `SQLite` implementation of the read-only track repository.
//!
//! # Architecture
//!
//! - **Document Columns**: genres, audio features and sources live in JSON
//!   columns; legacy records may hold a scalar `genres` value
//! - **Shadow Fields**: lower-cased copies of title, artist, album and genres
//!   are maintained by ingestion and are the only columns searched
//! - **Vertical Slicing**: Each collection view owns its own queries
//!
//! # Example
//!
//! ```rust,no_run
//! use musicdb_core::{TrackFilter, TrackRepository, SearchLimit};
//! use musicdb_storage::SqliteTrackRepository;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = SqliteTrackRepository::connect("sqlite://musicdb.db").await?;
//!
//! let filter = TrackFilter::new(Some("moon"), None, None);
//! let tracks = repo.search(&filter.to_predicate(), SearchLimit::default()).await?;
//!
//! repo.close().await;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod artists;
pub mod genres;
pub mod tracks;

pub use context::SqliteTrackRepository;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Creates the track collection on a fresh database. Ingestion owns the data;
/// the schema is only applied so the service can start against an empty file.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://musicdb.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    // Every connection to an in-memory database opens a separate database
    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    tracing::debug!(max_connections, "SQLite pool ready");

    Ok(pool)
}
