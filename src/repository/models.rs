//! Diesel ORM models for database tables.
//!
//! These records provide compile-time type checking for database operations.
//! Timestamps are stored as RFC 3339 strings; RFC 3339 in UTC sorts
//! lexicographically in chronological order.

use diesel::prelude::*;

use crate::schema;

/// User record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
}

/// New user for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub created_at: &'a str,
}

/// Post record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::posts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PostRecord {
    pub id: i64,
    pub author_id: i64,
    pub content: String,
    pub created_at: String,
}

/// New post for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::posts)]
pub struct NewPost<'a> {
    pub author_id: i64,
    pub content: &'a str,
    pub created_at: &'a str,
}

/// New like for insertion. Likes are only ever counted or deleted, so
/// there is no matching read-side record.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::likes)]
pub struct NewLike<'a> {
    pub user_id: i64,
    pub post_id: i64,
    pub created_at: &'a str,
}

/// New follow for insertion. Follows are only ever counted, filtered,
/// or deleted, so there is no matching read-side record.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::follows)]
pub struct NewFollow<'a> {
    pub follower_id: i64,
    pub followed_id: i64,
    pub created_at: &'a str,
}

/// Session record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::sessions)]
#[diesel(primary_key(token))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SessionRecord {
    pub token: String,
    pub user_id: i64,
    pub created_at: String,
    pub expires_at: String,
}

/// New session for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::sessions)]
pub struct NewSession<'a> {
    pub token: &'a str,
    pub user_id: i64,
    pub created_at: &'a str,
    pub expires_at: &'a str,
}
