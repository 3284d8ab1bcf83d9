//! Router construction.

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::static_files;

/// Headers added to every response.
const SECURITY_HEADERS: &[(&str, &str)] = &[
    (
        "content-security-policy",
        "default-src 'self'; img-src 'self' data: https:; style-src 'self' 'unsafe-inline'; \
         frame-ancestors 'none'",
    ),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
];

/// Create the application router: a single catch-all route serving the
/// output directory.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .fallback(static_files::serve_file)
        .with_state(state);

    for &(name, value) in SECURITY_HEADERS {
        router = router.layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ));
    }

    router.layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use pretty_assertions::assert_eq;
    use std::path::Path;
    use tower::ServiceExt;

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn router(output_dir: &Path, base_path: &str) -> Router {
        create_router(Arc::new(AppState {
            output_dir: output_dir.to_path_buf(),
            base_path: base_path.to_owned(),
        }))
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_owned());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8_lossy(&body).into_owned())
    }

    fn site() -> tempfile::TempDir {
        let temp_dir = tempfile::tempdir().unwrap();
        write(&temp_dir.path().join("index.html"), "home");
        write(&temp_dir.path().join("a.html"), "page a");
        write(&temp_dir.path().join("guide/index.html"), "guide");
        write(&temp_dir.path().join("assets/gocden.css"), "body {}");
        temp_dir
    }

    #[tokio::test]
    async fn test_serves_index_for_root() {
        let temp_dir = site();
        let (status, content_type, body) = get(router(temp_dir.path(), ""), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("text/html"));
        assert_eq!(body, "home");
    }

    #[tokio::test]
    async fn test_serves_implicit_html_extension() {
        let temp_dir = site();
        let (status, _, body) = get(router(temp_dir.path(), ""), "/a").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "page a");
    }

    #[tokio::test]
    async fn test_serves_directory_index() {
        let temp_dir = site();
        let (status, _, body) = get(router(temp_dir.path(), ""), "/guide/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "guide");
    }

    #[tokio::test]
    async fn test_serves_assets_with_mime_type() {
        let temp_dir = site();
        let (status, content_type, _) =
            get(router(temp_dir.path(), ""), "/assets/gocden.css").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("text/css"));
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let temp_dir = site();
        let (status, _, _) = get(router(temp_dir.path(), ""), "/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_base_path_is_stripped() {
        let temp_dir = site();
        let (status, _, body) = get(router(temp_dir.path(), "/docs"), "/docs/a").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "page a");

        let (status, _, _) = get(router(temp_dir.path(), "/docs"), "/a").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_security_headers() {
        let temp_dir = site();
        let response = router(temp_dir.path(), "")
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
        assert!(headers.contains_key("content-security-policy"));
    }
}
