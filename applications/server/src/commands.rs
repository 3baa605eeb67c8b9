/// One-shot CLI commands
use crate::{config::ServerConfig, error::Result};
use musicdb_core::{CoreError, TrackRepository};
use musicdb_storage::SqliteTrackRepository;

/// Catalog statistics as pretty-printed JSON, the same shape `/stats` returns
pub async fn stats_report(config: &ServerConfig) -> Result<String> {
    let repo = SqliteTrackRepository::connect(&config.storage.database_url)
        .await
        .map_err(CoreError::from)?;

    let stats = repo.stats().await;
    repo.close().await;

    let report = serde_json::to_string_pretty(&stats?).map_err(CoreError::from)?;
    Ok(report)
}
