/// Catalog listing and statistics API routes
use crate::{error::Result, state::AppState};
use axum::{extract::State, Json};
use musicdb_core::CatalogStats;

/// GET /artists
pub async fn list_artists(State(app_state): State<AppState>) -> Result<Json<Vec<String>>> {
    let artists = app_state.tracks.list_distinct_artists().await?;
    Ok(Json(artists))
}

/// GET /genres
pub async fn list_genres(State(app_state): State<AppState>) -> Result<Json<Vec<String>>> {
    let genres = app_state.tracks.list_distinct_genres().await?;
    Ok(Json(genres))
}

/// GET /stats
pub async fn stats(State(app_state): State<AppState>) -> Result<Json<CatalogStats>> {
    let stats = app_state.tracks.stats().await?;
    Ok(Json(stats))
}
