//! # General Route Handlers

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// The handler for the root (`/`) endpoint: the upload page.
pub async fn root() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}
