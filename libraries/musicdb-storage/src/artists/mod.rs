use musicdb_core::error::Result;
use sqlx::SqlitePool;

/// Distinct non-empty artist names, ascending
pub async fn list_distinct(pool: &SqlitePool) -> Result<Vec<String>> {
    let artists = sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT artist
         FROM tracks
         WHERE artist IS NOT NULL AND artist <> ''
         ORDER BY artist",
    )
    .fetch_all(pool)
    .await?;

    Ok(artists)
}

/// Number of distinct non-empty artist names
pub async fn count_distinct(pool: &SqlitePool) -> Result<u64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(DISTINCT artist)
         FROM tracks
         WHERE artist IS NOT NULL AND artist <> ''",
    )
    .fetch_one(pool)
    .await?;

    Ok(count as u64)
}
