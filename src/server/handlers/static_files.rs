//! Static asset handlers.

use axum::http::header;
use axum::response::IntoResponse;

use super::super::assets;

/// Serve CSS.
pub async fn serve_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], assets::CSS)
}

/// Serve the post edit/like script.
pub async fn serve_post_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        assets::POST_JS,
    )
}

/// Serve the follow-button hover script.
pub async fn serve_profile_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        assets::PROFILE_JS,
    )
}
