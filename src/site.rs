//! Demo site served by the `trie-router` binary.
//!
//! ```text
//! GET /                  → <static-dir>/index.html
//! GET /ping              → "pong"
//! GET /users/:username   → the username
//! GET /css/*.css         → <static-dir>/css/<file>
//! GET /js/*.js           → <static-dir>/js/<file>
//! anything else          → <static-dir>/404.html (404), or 405 if the
//!                          path exists under another method
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::http::{Dispatcher, RequestContext};
use crate::routing::RouterOptions;

/// Build the demo dispatcher, serving files from `static_dir`.
pub fn routes(options: RouterOptions, static_dir: impl Into<PathBuf>) -> Dispatcher {
    let static_dir = Arc::new(static_dir.into());
    let mut dispatcher = Dispatcher::with_options(options);

    dispatcher
        .get("/ping", |_ctx: RequestContext| async { "pong" })
        .get("/users/:username", |ctx: RequestContext| async move {
            ctx.param("username").unwrap_or_default().to_string()
        });

    let dir = static_dir.clone();
    dispatcher.get("/", move |_ctx: RequestContext| {
        let dir = dir.clone();
        async move { serve_file(&dir.join("index.html"), StatusCode::OK).await }
    });

    for (prefix, pattern) in [("css", "/css/*.css"), ("js", "/js/*.js")] {
        let dir = static_dir.clone();
        dispatcher.get(pattern, move |ctx: RequestContext| {
            let path = ctx.filename().map(|name| dir.join(prefix).join(name));
            async move {
                match path {
                    Some(path) => serve_file(&path, StatusCode::OK).await,
                    None => StatusCode::NOT_FOUND.into_response(),
                }
            }
        });
    }

    let dir = static_dir;
    dispatcher.not_found(move |_ctx: RequestContext| {
        let dir = dir.clone();
        async move { serve_file(&dir.join("404.html"), StatusCode::NOT_FOUND).await }
    });

    dispatcher
}

/// Send a file back with a content type guessed from its extension.
pub async fn serve_file(path: &Path, status: StatusCode) -> Response {
    match tokio::fs::read(path).await {
        Ok(bytes) => (status, [(header::CONTENT_TYPE, content_type(path))], bytes).into_response(),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Static file unavailable");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

pub fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}
