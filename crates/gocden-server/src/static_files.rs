//! Static file serving from the output directory.

use std::borrow::Cow;
use std::io::ErrorKind;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;

use crate::AppState;

/// Map a request path to a file path relative to the output directory.
///
/// `base_path` is stripped first; requests outside it resolve to `None`.
/// An empty remainder or one ending in `/` maps to `index.html`, and a last
/// segment without a `.` gets an `.html` extension. Paths with `..` segments
/// resolve to `None`.
#[must_use]
pub fn resolve_request_path(base_path: &str, request_path: &str) -> Option<String> {
    let decoded: Cow<'_, str> = percent_decode_str(request_path).decode_utf8().ok()?;

    let rest = decoded.strip_prefix(base_path.trim_end_matches('/'))?;
    if !rest.is_empty() && !rest.starts_with('/') {
        return None;
    }
    let rest = rest.trim_start_matches('/');

    if rest.split('/').any(|segment| segment == "..") || rest.contains('\\') {
        return None;
    }

    let mut path = rest.to_owned();
    if path.is_empty() || path.ends_with('/') {
        path.push_str("index.html");
    } else if !path.rsplit('/').next().is_some_and(|last| last.contains('.')) {
        path.push_str(".html");
    }
    Some(path)
}

/// Catch-all handler.
pub(crate) async fn serve_file(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let Some(relative) = resolve_request_path(&state.base_path, uri.path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let path = state.output_dir.join(&relative);
    match tokio::fs::read(&path).await {
        Ok(content) => {
            let mime = gocden_assets::mime_for(&relative);
            ([(header::CONTENT_TYPE, mime)], content).into_response()
        }
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::IsADirectory) => {
            tracing::debug!(path = %uri.path(), "Not found");
            StatusCode::NOT_FOUND.into_response()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Could not read file");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
