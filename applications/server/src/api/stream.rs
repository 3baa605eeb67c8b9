/// Audio file download API
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    body::Body,
    extract::{Path, Request, State},
    http::{header, HeaderValue},
    response::Response,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tower::ServiceExt;
use tower_http::services::ServeFile;

/// GET /tracks/file/:id
/// Download the audio file of a track, with range request support
pub async fn download_track_file(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    request: Request,
) -> Result<Response> {
    let track = app_state
        .tracks
        .get_by_key(&id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Track not found".to_string()))?;

    let reference = track
        .music_file
        .as_deref()
        .ok_or_else(|| ServerError::NotFound("Track has no audio file".to_string()))?;

    let file_path = app_state.media.resolve(reference).await?;
    tracing::debug!("Serving {:?} for track {}", file_path, track.key);

    // ServeFile handles MIME detection, conditional and Range requests
    let response = ServeFile::new(&file_path)
        .oneshot(request)
        .await
        .unwrap_or_else(|never| match never {});

    let mut response = response.map(Body::new);
    if response.status().is_success() {
        let disposition = HeaderValue::from_str(&content_disposition(&track.title))
            .map_err(|e| ServerError::Internal(format!("Invalid Content-Disposition: {}", e)))?;
        response
            .headers_mut()
            .insert(header::CONTENT_DISPOSITION, disposition);
    }

    Ok(response)
}

/// RFC 5987 `attr-char`: everything else in an extended value is escaped
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// Build an attachment disposition naming the file `<title>.mp3`
fn content_disposition(title: &str) -> String {
    let filename = format!("{}.mp3", title);

    let plain = filename
        .chars()
        .all(|c| (' '..='~').contains(&c) && c != '"' && c != '\\');
    if plain {
        return format!("attachment; filename=\"{}\"", filename);
    }

    format!(
        "attachment; filename*=UTF-8''{}",
        utf8_percent_encode(&filename, ATTR_CHAR)
    )
}
