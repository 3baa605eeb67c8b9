/// Service layer modules
pub mod media_files;

pub use media_files::MediaFiles;
