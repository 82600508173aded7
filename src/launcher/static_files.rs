//! Working-directory file server.
//!
//! # Responsibilities
//! - Serve files under the configured root over plain HTTP
//! - Render an HTML listing for directory paths
//! - Serve strictly one request at a time
//!
//! # Design Decisions
//! - A global concurrency limit of 1 reproduces the synchronous serving
//!   model: a second request queues until the first completes
//! - No request timeout and no keep-alive tuning
//! - Everything under the root is readable; there is no access control.
//!   Deploy behind something that cares, or not at all

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Router;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::util::ServiceExt;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::StaticConfig;

#[derive(Clone)]
struct StaticState {
    root: Arc<PathBuf>,
    listing: bool,
}

/// Build the file-serving router.
pub fn router(config: &StaticConfig) -> Router {
    let state = StaticState {
        root: Arc::new(PathBuf::from(&config.root)),
        listing: config.listing,
    };

    Router::new()
        .fallback(serve_path)
        .with_state(state)
        .layer(GlobalConcurrencyLimitLayer::new(1))
        .layer(TraceLayer::new_for_http())
}

/// Serve one path: directories render a listing, everything else goes
/// through the static file service (which answers 404 for missing paths).
async fn serve_path(State(state): State<StaticState>, request: Request) -> Response {
    let uri_path = request.uri().path().to_string();

    if state.listing {
        if let Some(dir) = directory_for(&state.root, &uri_path) {
            // Relative hrefs in the listing need the trailing slash.
            if !uri_path.ends_with('/') {
                return Redirect::permanent(&format!("{}/", uri_path)).into_response();
            }
            return match render_listing(&dir, &uri_path).await {
                Ok(html) => Html(html).into_response(),
                Err(e) => {
                    tracing::warn!(path = %uri_path, error = %e, "Failed to read directory");
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            };
        }
    }

    match ServeDir::new(state.root.as_ref()).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(infallible) => match infallible {},
    }
}

/// Map a request path onto a directory under the root. `None` when the path
/// escapes the root or does not name a directory.
fn directory_for(root: &Path, uri_path: &str) -> Option<PathBuf> {
    let mut full = root.to_path_buf();
    for segment in uri_path.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment == ".." || segment.contains('\\') {
            return None;
        }
        full.push(segment);
    }
    full.is_dir().then_some(full)
}

async fn render_listing(dir: &Path, uri_path: &str) -> std::io::Result<String> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false) {
            name.push('/');
        }
        names.push(name);
    }
    names.sort();

    let title = escape(uri_path);
    let mut html = String::with_capacity(256 + names.len() * 64);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\">");
    html.push_str(&format!("<title>Directory listing for {}</title></head><body>", title));
    html.push_str(&format!("<h1>Directory listing for {}</h1><hr><ul>", title));
    for name in &names {
        let name = escape(name);
        html.push_str(&format!("<li><a href=\"{0}\">{0}</a></li>", name));
    }
    html.push_str("</ul><hr></body></html>");
    Ok(html)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_for_resolves_nested_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("sub")).unwrap();
        std::fs::write(tmp.path().join("sub/file.txt"), b"x").unwrap();

        assert_eq!(
            directory_for(tmp.path(), "/sub/"),
            Some(tmp.path().join("sub"))
        );
        assert_eq!(directory_for(tmp.path(), "/"), Some(tmp.path().to_path_buf()));
        assert_eq!(directory_for(tmp.path(), "/sub/file.txt"), None);
        assert_eq!(directory_for(tmp.path(), "/missing"), None);
    }

    #[test]
    fn directory_for_rejects_traversal() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(directory_for(tmp.path(), "/../"), None);
        assert_eq!(directory_for(tmp.path(), "/a/../../b"), None);
    }

    #[tokio::test]
    async fn listing_names_entries_and_marks_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("b.txt"), b"x").unwrap();
        std::fs::create_dir(tmp.path().join("a")).unwrap();

        let html = render_listing(tmp.path(), "/").await.unwrap();
        assert!(html.contains("<a href=\"a/\">a/</a>"));
        assert!(html.contains("<a href=\"b.txt\">b.txt</a>"));
        // Sorted: the directory entry comes first.
        assert!(html.find("a/").unwrap() < html.find("b.txt").unwrap());
    }

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(escape("<s>&\"t\""), "&lt;s&gt;&amp;&quot;t&quot;");
    }
}
