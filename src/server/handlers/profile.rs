//! Profile page and the follow/unfollow action.

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::super::template_structs::ProfileTemplate;
use super::super::AppState;
use super::helpers::{build_rows, current_user, page_error, paginate, PageParams};

/// A user's profile: counts, follow control, and their posts.
pub async fn profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<PageParams>,
    jar: CookieJar,
) -> Response {
    let viewer = current_user(&state, &jar).await;
    let viewer_name = viewer.as_ref().map(|u| u.username.clone());

    let target = match state.users.get_by_username(&username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return page_error(
                StatusCode::NOT_FOUND,
                viewer_name,
                "Not Found",
                &format!("No user named {}.", username),
            );
        }
        Err(e) => {
            return page_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                viewer_name,
                "Error",
                &format!("Failed to load profile: {}", e),
            );
        }
    };

    let result = async {
        let followers = state.follows.follower_count(target.id).await?;
        let following = state.follows.following_count(target.id).await?;
        let is_following = match viewer.as_ref() {
            Some(v) => state.follows.is_following(v.id, target.id).await?,
            None => false,
        };
        let total = state.posts.count_by_author(target.id).await?;
        let base = format!("/u/{}", target.username);
        let (pager, offset) = paginate(&base, params.page_number(), total, state.page_size);
        let page = state
            .posts
            .page_by_author(target.id, state.page_size as i64, offset)
            .await?;
        let posts = build_rows(&state, page, viewer.as_ref()).await?;
        Ok::<_, crate::repository::DieselError>((followers, following, is_following, posts, pager))
    }
    .await;

    match result {
        Ok((followers, following, is_following, posts, pager)) => {
            let show_follow = viewer
                .as_ref()
                .is_some_and(|v| v.id != target.id);
            let template = ProfileTemplate {
                viewer: viewer_name,
                profile_user: target.username,
                followers,
                following,
                show_follow,
                is_following,
                posts,
                pager,
            };
            Html(template.render().unwrap_or_else(|e| e.to_string())).into_response()
        }
        Err(e) => page_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            viewer_name,
            "Error",
            &format!("Failed to load profile: {}", e),
        ),
    }
}

/// Follow form body. The submit button's name selects the operation.
#[derive(Debug, Deserialize)]
pub struct FollowForm {
    pub follow: Option<String>,
    pub unfollow: Option<String>,
}

/// Follow or unfollow the profile's user, then return to the profile.
pub async fn profile_action(
    State(state): State<AppState>,
    Path(username): Path<String>,
    jar: CookieJar,
    axum::Form(form): axum::Form<FollowForm>,
) -> Response {
    let Some(viewer) = current_user(&state, &jar).await else {
        return Redirect::to("/login").into_response();
    };
    let viewer_name = Some(viewer.username.clone());

    let target = match state.users.get_by_username(&username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return page_error(
                StatusCode::NOT_FOUND,
                viewer_name,
                "Not Found",
                &format!("No user named {}.", username),
            );
        }
        Err(e) => {
            return page_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                viewer_name,
                "Error",
                &format!("Failed to load profile: {}", e),
            );
        }
    };

    let back = format!("/u/{}", target.username);

    // You cannot follow yourself
    if target.id == viewer.id {
        return Redirect::to(&back).into_response();
    }

    let result = if form.unfollow.is_some() {
        state.follows.unfollow(viewer.id, target.id).await
    } else if form.follow.is_some() {
        state.follows.follow(viewer.id, target.id).await
    } else {
        Ok(())
    };

    match result {
        Ok(()) => Redirect::to(&back).into_response(),
        Err(e) => page_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            viewer_name,
            "Error",
            &format!("Failed to update follow state: {}", e),
        ),
    }
}
