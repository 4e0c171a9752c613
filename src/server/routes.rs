//! Router configuration for the web server.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Feeds
        .route("/", get(handlers::index).post(handlers::create_post))
        .route(
            "/following",
            get(handlers::following).post(handlers::create_post),
        )
        // Post edit / like toggle endpoint used by the client scripts.
        // Any other method gets the JSON "PUT request required." answer.
        .route(
            "/post",
            put(handlers::update_post).fallback(handlers::put_required),
        )
        // Accounts
        .route(
            "/login",
            get(handlers::login_page).post(handlers::login_submit),
        )
        .route("/logout", get(handlers::logout))
        .route(
            "/register",
            get(handlers::register_page).post(handlers::register_submit),
        )
        // Profiles and the follow control
        .route(
            "/u/:username",
            get(handlers::profile).post(handlers::profile_action),
        )
        // Static assets (CSS/JS)
        .route("/static/style.css", get(handlers::serve_css))
        .route("/static/post.js", get(handlers::serve_post_js))
        .route("/static/profile.js", get(handlers::serve_profile_js))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
