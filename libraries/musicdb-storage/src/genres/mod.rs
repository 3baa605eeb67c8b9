//! Genre projections.
//!
//! `json_each` yields one row for a scalar JSON string and one row per
//! element for an array, so legacy and current records flatten the same way.

use musicdb_core::error::Result;
use sqlx::SqlitePool;

/// Distinct genre values across all tracks, ascending
pub async fn list_distinct(pool: &SqlitePool) -> Result<Vec<String>> {
    let genres = sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT g.value
         FROM tracks AS t, json_each(t.genres) AS g
         WHERE g.type = 'text' AND g.value <> ''
         ORDER BY g.value",
    )
    .fetch_all(pool)
    .await?;

    Ok(genres)
}

/// Number of distinct genre values
pub async fn count_distinct(pool: &SqlitePool) -> Result<u64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(DISTINCT g.value)
         FROM tracks AS t, json_each(t.genres) AS g
         WHERE g.type = 'text' AND g.value <> ''",
    )
    .fetch_one(pool)
    .await?;

    Ok(count as u64)
}
