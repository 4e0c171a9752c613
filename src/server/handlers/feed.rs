//! Feed handlers: the all-posts page, the following page, and post creation.

use askama::Template;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::super::template_structs::{FollowingTemplate, IndexTemplate};
use super::super::AppState;
use super::helpers::{build_rows, current_user, page_error, paginate, PageParams};
use crate::models::Post;

/// All posts, newest first.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
    jar: CookieJar,
) -> Response {
    let viewer = current_user(&state, &jar).await;
    let viewer_name = viewer.as_ref().map(|u| u.username.clone());

    let total = match state.posts.count_all().await {
        Ok(total) => total,
        Err(e) => {
            return page_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                viewer_name,
                "Error",
                &format!("Failed to load posts: {}", e),
            );
        }
    };

    let (pager, offset) = paginate("/", params.page_number(), total, state.page_size);
    let page = match state.posts.page_all(state.page_size as i64, offset).await {
        Ok(page) => page,
        Err(e) => {
            return page_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                viewer_name,
                "Error",
                &format!("Failed to load posts: {}", e),
            );
        }
    };

    let posts = match build_rows(&state, page, viewer.as_ref()).await {
        Ok(rows) => rows,
        Err(e) => {
            return page_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                viewer_name,
                "Error",
                &format!("Failed to load posts: {}", e),
            );
        }
    };

    let template = IndexTemplate {
        viewer: viewer_name,
        posts,
        pager,
    };
    Html(template.render().unwrap_or_else(|e| e.to_string())).into_response()
}

/// Posts by users the viewer follows, newest first. Login required.
pub async fn following(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
    jar: CookieJar,
) -> Response {
    let Some(viewer) = current_user(&state, &jar).await else {
        return Redirect::to("/login").into_response();
    };
    let viewer_name = Some(viewer.username.clone());

    let result = async {
        let followed = state.follows.following_ids(viewer.id).await?;
        let total = state.posts.count_by_authors(&followed).await?;
        let (pager, offset) = paginate("/following", params.page_number(), total, state.page_size);
        let page = state
            .posts
            .page_by_authors(&followed, state.page_size as i64, offset)
            .await?;
        let posts = build_rows(&state, page, Some(&viewer)).await?;
        Ok::<_, crate::repository::DieselError>((posts, pager))
    }
    .await;

    match result {
        Ok((posts, pager)) => {
            let template = FollowingTemplate {
                viewer: viewer_name,
                posts,
                pager,
            };
            Html(template.render().unwrap_or_else(|e| e.to_string())).into_response()
        }
        Err(e) => page_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            viewer_name,
            "Error",
            &format!("Failed to load posts: {}", e),
        ),
    }
}

/// Form body for creating a post.
#[derive(Debug, Deserialize)]
pub struct NewPostForm {
    #[serde(default)]
    pub content: String,
}

/// Create a post and return to the all-posts feed. Serves both the index
/// and following page forms. Invalid content is silently dropped, matching
/// the form's client-side constraints.
pub async fn create_post(
    State(state): State<AppState>,
    jar: CookieJar,
    axum::Form(form): axum::Form<NewPostForm>,
) -> Response {
    let Some(viewer) = current_user(&state, &jar).await else {
        return Redirect::to("/login").into_response();
    };

    if Post::valid_content(&form.content) {
        if let Err(e) = state.posts.create(viewer.id, form.content.trim()).await {
            return page_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                Some(viewer.username),
                "Error",
                &format!("Failed to save post: {}", e),
            );
        }
    }

    Redirect::to("/").into_response()
}
