//! musicdb Core
//!
//! Domain types, query construction, response shaping and the repository
//! trait for the musicdb track catalog.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackKey`, `GenreField`, `CatalogStats`
//! - **Query Builder**: `TrackFilter` → `Predicate`
//! - **Response Shaper**: `Track` → `TrackResponse`
//! - **Core Traits**: `TrackRepository`
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use musicdb_core::query::{Predicate, TrackFilter};
//!
//! let filter = TrackFilter::new(Some("Moon"), None, Some("Jazz"));
//! let predicate = filter.to_predicate();
//! assert_ne!(predicate, Predicate::MatchAll);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod query;
pub mod shape;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use query::{Predicate, SearchLimit, ShadowField, TrackFilter};
pub use shape::{shape_track, TrackResponse};
pub use storage::TrackRepository;
pub use types::{CatalogStats, GenreField, Track, TrackKey};
