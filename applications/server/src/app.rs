/// Router assembly
use crate::{
    api,
    config::CorsSettings,
    error::Result,
    state::AppState,
};
use axum::{http::header, routing::get, Router};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the application router
pub fn create_router(app_state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(api::root::root))
        // Tracks
        .route("/tracks", get(api::tracks::search_tracks))
        .route("/tracks/:id", get(api::tracks::get_track))
        .route("/tracks/file/:id", get(api::stream::download_track_file))
        // Catalog
        .route("/artists", get(api::catalog::list_artists))
        .route("/genres", get(api::catalog::list_genres))
        .route("/stats", get(api::catalog::stats))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(cors)
        .with_state(app_state)
}

/// CORS restricted to the configured origins, credentials allowed
pub fn cors_layer(settings: &CorsSettings) -> Result<CorsLayer> {
    let origins = settings.origin_header_values()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .expose_headers([
            header::CONTENT_DISPOSITION,
            header::CONTENT_RANGE,
            header::ACCEPT_RANGES,
        ]))
}
