//! Helper types and utility functions for handlers.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::super::template_structs::{ErrorTemplate, Pager, PostRow};
use super::super::AppState;
use crate::models::User;
use crate::repository::post::AuthoredPost;
use crate::repository::DieselError;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "perch_session";

/// Query params for paginated pages. The page number arrives as a raw
/// string so that garbage values fall back to page 1 instead of a 400.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

impl PageParams {
    pub fn page_number(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(1)
    }
}

/// Resolve the logged-in user from the session cookie, if any.
pub async fn current_user(state: &AppState, jar: &CookieJar) -> Option<User> {
    let token = jar.get(SESSION_COOKIE)?.value().to_string();

    let session = match state.sessions.get(&token).await {
        Ok(session) => session?,
        Err(e) => {
            tracing::warn!("session lookup failed: {}", e);
            return None;
        }
    };

    match state.users.get(session.user_id).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("user lookup failed: {}", e);
            None
        }
    }
}

/// Clamp a requested page against the total and compute the query offset.
pub fn paginate(base: &str, requested: usize, total: i64, per_page: usize) -> (Pager, i64) {
    let pages = ((total.max(0) as usize).div_ceil(per_page)).max(1);
    let page = requested.clamp(1, pages);
    let offset = ((page - 1) * per_page) as i64;

    let pager = Pager {
        base: base.to_string(),
        page,
        pages,
        prev: page.saturating_sub(1),
        next: page + 1,
        has_prev: page > 1,
        has_next: page < pages,
    };
    (pager, offset)
}

/// Decorate a page of posts with like counts and viewer-specific flags.
pub async fn build_rows(
    state: &AppState,
    posts: Vec<AuthoredPost>,
    viewer: Option<&User>,
) -> Result<Vec<PostRow>, DieselError> {
    let mut rows = Vec::with_capacity(posts.len());
    for authored in posts {
        let likes = state.posts.like_count(authored.post.id).await?;
        let liked = match viewer {
            Some(user) => state.posts.user_likes(user.id, authored.post.id).await?,
            None => false,
        };
        let editable = viewer.is_some_and(|user| user.id == authored.post.author_id);
        rows.push(PostRow::new(authored, likes, liked, editable));
    }
    Ok(rows)
}

/// Render the error page with the given status code.
pub fn page_error(
    status: StatusCode,
    viewer: Option<String>,
    title: &str,
    message: &str,
) -> Response {
    let template = ErrorTemplate {
        viewer,
        title: title.to_string(),
        message: message.to_string(),
    };
    (
        status,
        Html(template.render().unwrap_or_else(|e| e.to_string())),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_clamps_and_offsets() {
        let (pager, offset) = paginate("/", 1, 25, 10);
        assert_eq!((pager.page, pager.pages, offset), (1, 3, 0));
        assert!(!pager.has_prev);
        assert!(pager.has_next);

        let (pager, offset) = paginate("/", 99, 25, 10);
        assert_eq!((pager.page, offset), (3, 20));
        assert!(!pager.has_next);

        // Empty feed still has one (empty) page
        let (pager, offset) = paginate("/", 0, 0, 10);
        assert_eq!((pager.page, pager.pages, offset), (1, 1, 0));
    }

    #[test]
    fn test_page_params_fall_back_to_one() {
        let params = PageParams {
            page: Some("banana".to_string()),
        };
        assert_eq!(params.page_number(), 1);
        let params = PageParams {
            page: Some("3".to_string()),
        };
        assert_eq!(params.page_number(), 3);
        assert_eq!(PageParams::default().page_number(), 1);
    }
}
