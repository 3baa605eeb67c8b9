use musicdb_core::{
    error::Result,
    query::{Predicate, SearchLimit, ShadowField},
    types::{parse_date_added, GenreField, Track, TrackKey},
};
use serde_json::{Map, Value};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const TRACK_COLUMNS: &str = "id, music_id, title, artist, album, genres, release_date, \
     audio_features, sources, date_added, notes, music_file";

/// Canonical columns of a stored track, as read
#[derive(Debug, sqlx::FromRow)]
struct TrackRow {
    id: i64,
    music_id: Option<String>,
    title: String,
    artist: String,
    album: Option<String>,
    genres: Option<String>,
    release_date: Option<String>,
    audio_features: Option<String>,
    sources: Option<String>,
    date_added: Option<String>,
    notes: Option<String>,
    music_file: Option<String>,
}

impl TryFrom<TrackRow> for Track {
    type Error = musicdb_core::CoreError;

    fn try_from(row: TrackRow) -> Result<Self> {
        Ok(Track {
            key: TrackKey::from_parts(row.music_id, row.id),
            title: row.title,
            artist: row.artist,
            album: row.album,
            genres: GenreField::from_json(row.genres.as_deref())?.into_vec(),
            release_date: row.release_date,
            audio_features: parse_object(row.audio_features.as_deref())?,
            sources: parse_object(row.sources.as_deref())?,
            date_added: row.date_added.as_deref().and_then(parse_date_added),
            notes: row.notes,
            music_file: row.music_file.filter(|path| !path.is_empty()),
        })
    }
}

/// Decode a JSON object column; `NULL` and JSON `null` read as empty
fn parse_object(raw: Option<&str>) -> Result<Map<String, Value>> {
    let Some(text) = raw else {
        return Ok(Map::new());
    };

    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(musicdb_core::CoreError::storage(format!(
            "expected a JSON object, found {}",
            other
        ))),
    }
}

/// Append `predicate` as a SQL boolean expression.
///
/// Needles are always bound, never spliced, and matched with `instr` so that
/// no character in user input has pattern meaning.
fn push_predicate(builder: &mut QueryBuilder<'_, Sqlite>, predicate: &Predicate) {
    match predicate {
        Predicate::MatchAll => {
            builder.push("1 = 1");
        }
        Predicate::Contains {
            field: ShadowField::Genres,
            needle,
        } => {
            builder.push("EXISTS (SELECT 1 FROM json_each(tracks.");
            builder.push(ShadowField::Genres.column());
            builder.push(") AS g WHERE g.type = 'text' AND instr(g.value, ");
            builder.push_bind(needle.clone());
            builder.push(") > 0)");
        }
        Predicate::Contains { field, needle } => {
            builder.push("instr(tracks.");
            builder.push(field.column());
            builder.push(", ");
            builder.push_bind(needle.clone());
            builder.push(") > 0");
        }
        Predicate::AnyOf(children) => push_group(builder, children, " OR ", "0 = 1"),
        Predicate::AllOf(children) => push_group(builder, children, " AND ", "1 = 1"),
    }
}

fn push_group(
    builder: &mut QueryBuilder<'_, Sqlite>,
    children: &[Predicate],
    separator: &str,
    when_empty: &str,
) {
    if children.is_empty() {
        builder.push(when_empty);
        return;
    }

    builder.push("(");
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            builder.push(separator);
        }
        push_predicate(builder, child);
    }
    builder.push(")");
}

/// Tracks matching `predicate`, capped at `limit`, in store order
pub async fn search(
    pool: &SqlitePool,
    predicate: &Predicate,
    limit: SearchLimit,
) -> Result<Vec<Track>> {
    let mut builder = QueryBuilder::<Sqlite>::new("SELECT ");
    builder.push(TRACK_COLUMNS);
    builder.push(" FROM tracks WHERE ");
    push_predicate(&mut builder, predicate);
    builder.push(" LIMIT ");
    builder.push_bind(i64::from(limit.get()));

    let rows = builder
        .build_query_as::<TrackRow>()
        .fetch_all(pool)
        .await?;

    rows.into_iter().map(Track::try_from).collect()
}

/// Get track by its public key.
///
/// A `music_id` match wins; otherwise a document without `music_id` whose
/// internal id renders exactly as `key` is returned.
pub async fn get_by_key(pool: &SqlitePool, key: &str) -> Result<Option<Track>> {
    let internal_id = key
        .parse::<i64>()
        .ok()
        .filter(|id| id.to_string() == key);

    let row = sqlx::query_as::<_, TrackRow>(&format!(
        "SELECT {TRACK_COLUMNS}
         FROM tracks
         WHERE music_id = ?
            OR ((music_id IS NULL OR music_id = '') AND id = ?)
         ORDER BY music_id IS NULL OR music_id = ''
         LIMIT 1"
    ))
    .bind(key)
    .bind(internal_id)
    .fetch_optional(pool)
    .await?;

    row.map(Track::try_from).transpose()
}

/// Total number of stored tracks
pub async fn count_all(pool: &SqlitePool) -> Result<u64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tracks")
        .fetch_one(pool)
        .await?;

    Ok(count as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use musicdb_core::TrackFilter;

    fn render(predicate: &Predicate) -> String {
        let mut builder = QueryBuilder::<Sqlite>::new("");
        push_predicate(&mut builder, predicate);
        builder.sql().to_string()
    }

    #[test]
    fn test_match_all_renders_tautology() {
        assert_eq!(render(&Predicate::MatchAll), "1 = 1");
    }

    #[test]
    fn test_needles_are_bound_not_spliced() {
        let predicate = TrackFilter::new(Some("x' OR 1=1 --"), None, None).to_predicate();
        let sql = render(&predicate);

        assert!(!sql.contains("OR 1=1"));
        assert_eq!(
            sql,
            "((instr(tracks.title_lower, ?) > 0 OR instr(tracks.artist_lower, ?) > 0 \
             OR instr(tracks.album_lower, ?) > 0))"
        );
    }

    #[test]
    fn test_genre_clause_walks_json_elements() {
        let predicate = TrackFilter::new(None, Some("a"), Some("rock")).to_predicate();
        let sql = render(&predicate);

        assert_eq!(
            sql,
            "(instr(tracks.artist_lower, ?) > 0 AND EXISTS (SELECT 1 FROM \
             json_each(tracks.genres_lower) AS g WHERE g.type = 'text' AND instr(g.value, ?) > 0))"
        );
    }

    #[test]
    fn test_empty_groups() {
        assert_eq!(render(&Predicate::AnyOf(vec![])), "0 = 1");
        assert_eq!(render(&Predicate::AllOf(vec![])), "1 = 1");
    }

    #[test]
    fn test_parse_object_variants() {
        assert!(parse_object(None).unwrap().is_empty());
        assert!(parse_object(Some("null")).unwrap().is_empty());
        assert_eq!(
            parse_object(Some(r#"{"bpm": 120}"#)).unwrap().get("bpm"),
            Some(&Value::from(120))
        );
        assert!(parse_object(Some("[1]")).is_err());
    }
}
