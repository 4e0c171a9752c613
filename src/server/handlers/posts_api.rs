//! The `/post` JSON endpoint used by the client scripts.
//!
//! One PUT endpoint covers both operations: an `editedpost` field persists
//! an inline edit, a `clicked` flag toggles the caller's like. The client
//! sends the post id as the raw data-attribute string, so both string and
//! numeric ids are accepted, and the body arrives without a JSON content
//! type, so it is parsed from raw bytes.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::super::AppState;
use super::helpers::current_user;
use crate::models::{Post, MAX_POST_LEN};

/// Post id as the client sends it: either a JSON number or the string
/// taken from the element's data attribute.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Num(i64),
    Text(String),
}

impl PostId {
    fn as_i64(&self) -> Option<i64> {
        match self {
            PostId::Num(n) => Some(*n),
            PostId::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Body of the PUT request.
#[derive(Debug, Deserialize)]
pub struct UpdatePayload {
    pub editedpost: Option<String>,
    pub clicked: Option<bool>,
    pub post_id: Option<PostId>,
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// Apply an edit and/or a like toggle to a post.
pub async fn update_post(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Response {
    let Some(user) = current_user(&state, &jar).await else {
        return json_error(StatusCode::UNAUTHORIZED, "Authentication required.");
    };

    let payload: UpdatePayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(_) => return json_error(StatusCode::BAD_REQUEST, "Invalid JSON body."),
    };

    let Some(post_id) = payload.post_id.as_ref().and_then(PostId::as_i64) else {
        return json_error(StatusCode::BAD_REQUEST, "Post does not exist.");
    };

    let post = match state.posts.get(post_id).await {
        Ok(Some(post)) => post,
        Ok(None) => return json_error(StatusCode::BAD_REQUEST, "Post does not exist."),
        Err(e) => {
            tracing::error!("post lookup failed: {}", e);
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error.");
        }
    };

    // An empty editedpost is treated as absent, like the original form
    if let Some(content) = payload.editedpost.as_deref().filter(|c| !c.is_empty()) {
        if post.author_id != user.id {
            return json_error(StatusCode::FORBIDDEN, "You can only edit your own posts.");
        }
        if !Post::valid_content(content) {
            return json_error(
                StatusCode::BAD_REQUEST,
                &format!("Post content must be 1 to {} characters.", MAX_POST_LEN),
            );
        }
        if let Err(e) = state.posts.update_content(post.id, content).await {
            tracing::error!("post update failed: {}", e);
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error.");
        }
    }

    let likes = if payload.clicked == Some(true) {
        state.posts.toggle_like(user.id, post.id).await
    } else {
        state.posts.like_count(post.id).await
    };

    match likes {
        // likes_number is a string: the client parses it with parseInt
        Ok(count) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "You edit the post successfully",
                "likes_number": count.to_string(),
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("like toggle failed: {}", e);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error.")
        }
    }
}

/// Answer for any non-PUT method on `/post`.
pub async fn put_required() -> Response {
    json_error(StatusCode::BAD_REQUEST, "PUT request required.")
}
