//! Web server for the social network.
//!
//! Serves the rendered feeds (all posts, following, profiles), the
//! login/register pages, the `/post` JSON endpoint used by the client
//! scripts, and the static assets themselves.

mod assets;
mod handlers;
mod routes;
mod template_structs;

pub use routes::create_router;

use std::net::SocketAddr;

use crate::config::Settings;
use crate::repository::{
    DbContext, FollowRepository, PostRepository, SessionRepository, UserRepository,
};

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub users: UserRepository,
    pub posts: PostRepository,
    pub follows: FollowRepository,
    pub sessions: SessionRepository,
    /// Posts per feed page.
    pub page_size: usize,
    /// Session lifetime in days.
    pub session_ttl_days: i64,
}

impl AppState {
    pub fn new(ctx: &DbContext, settings: &Settings) -> Self {
        Self {
            users: ctx.users(),
            posts: ctx.posts(),
            follows: ctx.follows(),
            sessions: ctx.sessions(),
            page_size: settings.page_size,
            session_ttl_days: settings.session_ttl_days,
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let ctx = settings.create_db_context();

    match ctx.sessions().purge_expired().await {
        Ok(0) => {}
        Ok(n) => tracing::info!("purged {} expired sessions", n),
        Err(e) => tracing::warn!("failed to purge expired sessions: {}", e),
    }

    let state = AppState::new(&ctx, settings);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
