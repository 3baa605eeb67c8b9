//! Domain types for the track catalog

mod genre;
mod ids;
mod stats;
mod track;

pub use genre::GenreField;
pub use ids::TrackKey;
pub use stats::CatalogStats;
pub use track::{parse_date_added, Track};
