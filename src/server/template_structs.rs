//! Askama template structs for the web interface.
//!
//! Each struct corresponds to an HTML template in the templates/ directory.
//! Askama provides compile-time verification that templates are valid.

use askama::Template;

use crate::repository::post::AuthoredPost;
use crate::utils::format_timestamp;

/// One post as feeds render it. The `content` and `likes` elements carry
/// ids derived from the post id so the client scripts can address them.
pub struct PostRow {
    pub id: i64,
    pub author: String,
    pub content: String,
    pub created: String,
    pub likes: i64,
    /// Whether the viewer has liked this post (selects the filled heart).
    pub liked: bool,
    /// Whether the viewer may edit this post (shows the edit trigger).
    pub editable: bool,
}

impl PostRow {
    pub fn new(authored: AuthoredPost, likes: i64, liked: bool, editable: bool) -> Self {
        Self {
            id: authored.post.id,
            author: authored.author,
            created: format_timestamp(&authored.post.created_at),
            content: authored.post.content,
            likes,
            liked,
            editable,
        }
    }
}

/// Pagination state for feed pages.
pub struct Pager {
    /// Path the page links point at ("/", "/following", "/u/name").
    pub base: String,
    pub page: usize,
    pub pages: usize,
    pub prev: usize,
    pub next: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

/// All-posts feed.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub viewer: Option<String>,
    pub posts: Vec<PostRow>,
    pub pager: Pager,
}

/// Posts from followed users only.
#[derive(Template)]
#[template(path = "following.html")]
pub struct FollowingTemplate {
    pub viewer: Option<String>,
    pub posts: Vec<PostRow>,
    pub pager: Pager,
}

/// A user's profile: counts, follow control, and their posts.
#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub viewer: Option<String>,
    pub profile_user: String,
    pub followers: i64,
    pub following: i64,
    /// Show the follow/unfollow form (logged in, not your own profile).
    pub show_follow: bool,
    pub is_following: bool,
    pub posts: Vec<PostRow>,
    pub pager: Pager,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub viewer: Option<String>,
    pub message: Option<String>,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub viewer: Option<String>,
    pub message: Option<String>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub viewer: Option<String>,
    pub title: String,
    pub message: String,
}
