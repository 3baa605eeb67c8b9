//! CLI command tests against a temporary catalog

mod common;

use common::seed_scenario;
use musicdb_server::{commands::stats_report, ServerConfig};
use musicdb_storage::SqliteTrackRepository;
use serde_json::{json, Value};

fn config_for(db_path: &std::path::Path) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.storage.database_url = format!("sqlite://{}", db_path.display());
    config
}

#[tokio::test]
async fn test_stats_report_for_seeded_catalog() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("catalog.db");

    let repo = SqliteTrackRepository::connect(&format!("sqlite://{}", db_path.display()))
        .await
        .unwrap();
    seed_scenario(repo.pool()).await;
    repo.pool().close().await;

    let report = stats_report(&config_for(&db_path)).await.unwrap();
    let value: Value = serde_json::from_str(&report).unwrap();

    assert_eq!(
        value,
        json!({"total_tracks": 2, "total_artists": 2, "total_genres": 3})
    );
}

#[tokio::test]
async fn test_stats_report_creates_empty_catalog() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("fresh.db");

    let report = stats_report(&config_for(&db_path)).await.unwrap();
    let value: Value = serde_json::from_str(&report).unwrap();

    assert_eq!(
        value,
        json!({"total_tracks": 0, "total_artists": 0, "total_genres": 0})
    );
    assert!(db_path.exists());
}
