//! MusicDB Server Library
//!
//! Read-only HTTP query layer over a music-track catalog: search, lookup,
//! catalog listings, aggregate statistics and audio file download.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use app::{cors_layer, create_router};
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::MediaFiles;
pub use state::AppState;
