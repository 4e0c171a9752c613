//! Login, logout, and registration handlers.

use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;

use super::super::template_structs::{LoginTemplate, RegisterTemplate};
use super::super::AppState;
use super::helpers::{current_user, page_error, SESSION_COOKIE};
use crate::auth::{hash_password, verify_password};
use crate::repository::is_unique_violation;

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .build()
}

fn render_login(viewer: Option<String>, message: Option<String>) -> Response {
    let template = LoginTemplate { viewer, message };
    Html(template.render().unwrap_or_else(|e| e.to_string())).into_response()
}

fn render_register(viewer: Option<String>, message: Option<String>) -> Response {
    let template = RegisterTemplate { viewer, message };
    Html(template.render().unwrap_or_else(|e| e.to_string())).into_response()
}

/// Login form.
pub async fn login_page(State(state): State<AppState>, jar: CookieJar) -> Response {
    let viewer = current_user(&state, &jar).await.map(|u| u.username);
    render_login(viewer, None)
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Attempt to sign the user in.
pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    axum::Form(form): axum::Form<LoginForm>,
) -> Response {
    let user = match state.users.get_by_username(&form.username).await {
        Ok(user) => user,
        Err(e) => {
            return page_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                None,
                "Error",
                &format!("Login failed: {}", e),
            );
        }
    };

    let Some(user) = user.filter(|u| verify_password(&form.password, &u.password_hash)) else {
        return render_login(None, Some("Invalid username and/or password.".to_string()));
    };

    match state.sessions.create(user.id, state.session_ttl_days).await {
        Ok(session) => {
            let jar = jar.add(session_cookie(session.token));
            (jar, Redirect::to("/")).into_response()
        }
        Err(e) => page_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            None,
            "Error",
            &format!("Login failed: {}", e),
        ),
    }
}

/// Sign the user out and return to the index.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Err(e) = state.sessions.delete(cookie.value()).await {
            tracing::warn!("failed to delete session: {}", e);
        }
    }
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to("/")).into_response()
}

/// Registration form.
pub async fn register_page(State(state): State<AppState>, jar: CookieJar) -> Response {
    let viewer = current_user(&state, &jar).await.map(|u| u.username);
    render_register(viewer, None)
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirmation: String,
}

fn valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.chars().count() <= 30
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Attempt to create a new account, then sign it in.
pub async fn register_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    axum::Form(form): axum::Form<RegisterForm>,
) -> Response {
    // Ensure password matches confirmation
    if form.password != form.confirmation {
        return render_register(None, Some("Passwords must match.".to_string()));
    }
    if form.username.is_empty() || form.email.is_empty() || form.password.is_empty() {
        return render_register(None, Some("You must fill out all fields.".to_string()));
    }
    // Usernames appear in profile URLs, so keep them URL-safe
    if !valid_username(&form.username) {
        return render_register(
            None,
            Some("Username may only contain letters, numbers, and underscores.".to_string()),
        );
    }

    let password_hash = match hash_password(&form.password) {
        Ok(hash) => hash,
        Err(e) => {
            return page_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                None,
                "Error",
                &format!("Registration failed: {}", e),
            );
        }
    };

    let user = match state
        .users
        .create(&form.username, &form.email, &password_hash)
        .await
    {
        Ok(user) => user,
        Err(e) if is_unique_violation(&e) => {
            return render_register(None, Some("Username already taken.".to_string()));
        }
        Err(e) => {
            return page_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                None,
                "Error",
                &format!("Registration failed: {}", e),
            );
        }
    };

    match state.sessions.create(user.id, state.session_ttl_days).await {
        Ok(session) => {
            let jar = jar.add(session_cookie(session.token));
            (jar, Redirect::to("/")).into_response()
        }
        Err(e) => page_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            None,
            "Error",
            &format!("Registration failed: {}", e),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_username() {
        assert!(valid_username("alice"));
        assert!(valid_username("alice_99"));
        assert!(!valid_username(""));
        assert!(!valid_username("a b"));
        assert!(!valid_username("a/b"));
        assert!(!valid_username(&"a".repeat(31)));
    }
}
