//! Build script for musicdb-storage.
//!
//! `sqlx::migrate!` embeds the SQL files at compile time, so an edited or
//! added migration has to rebuild the crate.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
    println!("cargo:rerun-if-changed=build.rs");
}
