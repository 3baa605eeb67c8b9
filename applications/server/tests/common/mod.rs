//! Common test utilities and fixtures
//!
//! Builds the real router over a temporary SQLite file. Fixtures insert raw
//! documents, shadow fields included, the way the ingestion process does.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use musicdb_server::{cors_layer, create_router, AppState, MediaFiles, ServerConfig};
use musicdb_storage::SqliteTrackRepository;
use serde_json::Value;
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Router plus the backing database; files are removed on drop
pub struct TestApp {
    pub router: Router,
    pub repo: SqliteTrackRepository,
    pub media_dir: TempDir,
    _db_dir: TempDir,
}

impl TestApp {
    /// App with default configuration and a media root under a temp dir
    pub async fn new() -> Self {
        let db_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let media_dir = tempfile::tempdir().expect("Failed to create media dir");
        let db_url = format!("sqlite://{}", db_dir.path().join("test.db").display());

        let repo = SqliteTrackRepository::connect(&db_url)
            .await
            .expect("Failed to open test database");

        let config = ServerConfig::default();
        let state = AppState::new(
            Arc::new(repo.clone()),
            Arc::new(MediaFiles::new(Some(media_dir.path().to_path_buf()))),
        );
        let cors = cors_layer(&config.cors).expect("Default CORS settings are valid");

        Self {
            router: create_router(state, cors),
            repo,
            media_dir,
            _db_dir: db_dir,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        self.repo.pool()
    }

    /// Send a request through the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible")
    }

    /// GET a path and decode the JSON body
    pub async fn get_json(&self, uri: &str) -> (u16, Value) {
        let response = self.send(get(uri)).await;
        let status = response.status().as_u16();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&bytes).expect("Body is not JSON");
        (status, body)
    }

    /// Write a file under the media root
    pub fn write_media(&self, name: &str, data: &[u8]) {
        std::fs::write(self.media_dir.path().join(name), data).expect("Failed to write media");
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Valid request")
}

/// Insert a raw document, returning its internal id
pub async fn insert_track(
    pool: &SqlitePool,
    music_id: Option<&str>,
    title: &str,
    artist: &str,
    genres: Value,
    music_file: Option<&str>,
) -> i64 {
    let genres_lower = match &genres {
        Value::String(g) => Value::String(g.to_lowercase()),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| match item {
                    Value::String(g) => Value::String(g.to_lowercase()),
                    other => other.clone(),
                })
                .collect(),
        ),
        other => other.clone(),
    };

    sqlx::query(
        "INSERT INTO tracks (
            music_id, title, artist, genres, music_file, date_added,
            title_lower, artist_lower, genres_lower
         ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(music_id)
    .bind(title)
    .bind(artist)
    .bind(genres.to_string())
    .bind(music_file)
    .bind("2024-01-05T10:00:00Z")
    .bind(title.to_lowercase())
    .bind(artist.to_lowercase())
    .bind(genres_lower.to_string())
    .execute(pool)
    .await
    .expect("Failed to insert test track")
    .last_insert_rowid()
}

/// The two-track catalog used across scenarios
pub async fn seed_scenario(pool: &SqlitePool) {
    insert_track(
        pool,
        Some("mus-blue"),
        "Blue Moon",
        "Artist A",
        serde_json::json!(["jazz", "pop"]),
        Some("blue.mp3"),
    )
    .await;
    insert_track(
        pool,
        Some("mus-red"),
        "Red Sun",
        "Artist B",
        serde_json::json!("rock"),
        None,
    )
    .await;
}
