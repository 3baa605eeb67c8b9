/// Tracks API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use musicdb_core::{shape_track, SearchLimit, TrackFilter, TrackResponse};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct TrackQuery {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// GET /tracks
pub async fn search_tracks(
    State(app_state): State<AppState>,
    query: std::result::Result<Query<TrackQuery>, QueryRejection>,
) -> Result<Json<Vec<TrackResponse>>> {
    let Query(query) = query.map_err(|e| ServerError::Validation(e.body_text()))?;

    let limit = SearchLimit::try_from(query.limit)?;
    let filter = TrackFilter::new(
        query.query.as_deref(),
        query.artist.as_deref(),
        query.genre.as_deref(),
    );

    let tracks = app_state
        .tracks
        .search(&filter.to_predicate(), limit)
        .await?;

    tracing::debug!("Search {:?} returned {} tracks", filter, tracks.len());

    Ok(Json(tracks.iter().map(TrackResponse::from).collect()))
}

/// GET /tracks/:id
pub async fn get_track(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<TrackResponse>> {
    let track = app_state.tracks.get_by_key(&id).await?;

    shape_track(track.as_ref())
        .map(Json)
        .ok_or_else(|| ServerError::NotFound("Track not found".to_string()))
}
