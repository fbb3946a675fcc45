//! Static file server for the built front-end bundle.
//!
//! Serves files out of a directory with SPA semantics: unknown paths fall
//! back to `index.html` so client-side routes survive a hard refresh.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    body::Body,
    extract::{Request, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::CorsLayer;

/// Configuration for the static server.
pub struct ServeConfig {
    pub port: u16,
    pub dir: PathBuf,
    /// When false, unknown paths 404 instead of falling back to index.html.
    pub spa: bool,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            port: 8081,
            dir: PathBuf::from("dist"),
            spa: true,
        }
    }
}

struct ServeState {
    dir: PathBuf,
    spa: bool,
}

/// Build the router: health probe plus the static fallback.
pub fn build_router(config: &ServeConfig) -> Router {
    let state = Arc::new(ServeState {
        dir: config.dir.clone(),
        spa: config.spa,
    });
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .fallback(static_handler)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the requested file, or index.html for SPA client-side routing.
async fn static_handler(State(state): State<Arc<ServeState>>, req: Request<Body>) -> Response {
    let path = req.uri().path().trim_start_matches('/');

    if !path.is_empty() {
        let Some(file) = resolve(&state.dir, path) else {
            return StatusCode::NOT_FOUND.into_response();
        };
        if let Ok(content) = tokio::fs::read(&file).await {
            return file_response(&file, content);
        }
        if !state.spa {
            return StatusCode::NOT_FOUND.into_response();
        }
    }

    let index = state.dir.join("index.html");
    match tokio::fs::read(&index).await {
        Ok(content) => file_response(&index, content),
        Err(_) => (
            StatusCode::NOT_FOUND,
            "index.html not found. Build the front-end bundle first.",
        )
            .into_response(),
    }
}

fn file_response(path: &Path, content: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    (
        [(header::CONTENT_TYPE, mime.as_ref().to_string())],
        content,
    )
        .into_response()
}

/// Join a request path onto the root, refusing anything that would escape it.
fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = Path::new(request_path);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(relative))
}

/// Bind and serve until Ctrl+C.
pub async fn start_server(config: ServeConfig) -> Result<()> {
    let app = build_router(&config);

    let addr = format!("127.0.0.1:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    let local_addr = listener.local_addr()?;
    println!(
        "Serving {} at http://{}",
        config.dir.display(),
        local_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn fixture() -> (TempDir, Router) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "<html>app</html>").unwrap();
        fs::write(dir.path().join("app.js"), "console.log('hi')").unwrap();
        let router = build_router(&ServeConfig {
            port: 0,
            dir: dir.path().to_path_buf(),
            spa: true,
        });
        (dir, router)
    }

    async fn body_string(resp: Response) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let (_dir, app) = fixture();
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "OK");
    }

    #[tokio::test]
    async fn serves_existing_file_with_mime_type() {
        let (_dir, app) = fixture();
        let resp = app
            .oneshot(Request::builder().uri("/app.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.contains("javascript"), "{content_type}");
    }

    #[tokio::test]
    async fn unknown_path_falls_back_to_index() {
        let (_dir, app) = fixture();
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/projects/abc123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "<html>app</html>");
    }

    #[tokio::test]
    async fn spa_disabled_turns_fallback_into_404() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "<html>app</html>").unwrap();
        let app = build_router(&ServeConfig {
            port: 0,
            dir: dir.path().to_path_buf(),
            spa: false,
        });
        let resp = app
            .oneshot(Request::builder().uri("/missing.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn parent_traversal_is_refused() {
        let (_dir, app) = fixture();
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/../../etc/passwd")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
