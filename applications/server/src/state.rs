/// Shared application state
use crate::services::MediaFiles;
use musicdb_core::TrackRepository;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub tracks: Arc<dyn TrackRepository>,
    pub media: Arc<MediaFiles>,
}

impl AppState {
    pub fn new(tracks: Arc<dyn TrackRepository>, media: Arc<MediaFiles>) -> Self {
        Self { tracks, media }
    }
}
