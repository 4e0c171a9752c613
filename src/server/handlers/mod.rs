//! HTTP request handlers for the web server.

mod accounts;
mod feed;
mod helpers;
mod posts_api;
mod profile;
mod static_files;

// Re-export handlers for use by the router
pub use accounts::{login_page, login_submit, logout, register_page, register_submit};
pub use feed::{create_post, following, index};
pub use posts_api::{put_required, update_post};
pub use profile::{profile, profile_action};
pub use static_files::{serve_css, serve_post_js, serve_profile_js};
