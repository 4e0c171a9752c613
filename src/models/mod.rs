//! Domain models for users, posts, and sessions. Likes and follows are
//! pure relationship rows and live only in the repository layer.

mod post;
mod user;

pub use post::{Post, MAX_POST_LEN};
pub use user::{Session, User};
