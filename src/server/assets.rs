//! Static asset constants (CSS and JavaScript).

/// Stylesheet for the web interface.
pub const CSS: &str = include_str!("styles.css");

/// Edit and like handlers for post rows.
pub const POST_JS: &str = include_str!("post.js");

/// Hover label swap for the follow button.
pub const PROFILE_JS: &str = include_str!("profile.js");
