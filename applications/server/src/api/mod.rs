/// API route modules
pub mod catalog;
pub mod root;
pub mod stream;
pub mod tracks;
