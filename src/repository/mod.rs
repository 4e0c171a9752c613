//! Repository layer for database persistence.
//!
//! All database access uses Diesel ORM with compile-time query checking
//! over SQLite, wrapped for async use via diesel-async.

pub mod context;
pub mod models;
pub mod pool;

pub mod follow;
pub mod post;
pub mod session;
pub mod user;

pub use context::DbContext;
pub use follow::FollowRepository;
pub use pool::{AsyncSqlitePool, DieselError};
pub use post::PostRepository;
pub use session::SessionRepository;
pub use user::UserRepository;

use chrono::{DateTime, Utc};

/// Parse a datetime string from the database, defaulting to Unix epoch on error.
pub fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// True when the error is a UNIQUE constraint violation.
pub fn is_unique_violation(e: &DieselError) -> bool {
    matches!(
        e,
        DieselError::DatabaseError(diesel::result::DatabaseErrorKind::UniqueViolation, _)
    )
}
