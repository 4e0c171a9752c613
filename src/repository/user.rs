//! User repository.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::models::{NewUser, UserRecord};
use super::pool::{AsyncSqlitePool, DieselError};
use super::parse_datetime;
use crate::models::User;
use crate::schema::users;

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User {
            id: record.id,
            username: record.username,
            email: record.email,
            password_hash: record.password_hash,
            created_at: parse_datetime(&record.created_at),
        }
    }
}

/// Repository for user accounts.
#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncSqlitePool,
}

impl UserRepository {
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Create a user. Fails with a unique violation when the username is taken.
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, DieselError> {
        let mut conn = self.pool.get().await?;

        let created_at = Utc::now().to_rfc3339();
        diesel::insert_into(users::table)
            .values(NewUser {
                username,
                email,
                password_hash,
                created_at: &created_at,
            })
            .execute(&mut conn)
            .await?;

        users::table
            .filter(users::username.eq(username))
            .first::<UserRecord>(&mut conn)
            .await
            .map(User::from)
    }

    /// Get a user by row ID.
    pub async fn get(&self, id: i64) -> Result<Option<User>, DieselError> {
        let mut conn = self.pool.get().await?;

        users::table
            .find(id)
            .first::<UserRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(User::from))
    }

    /// Get a user by username.
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, DieselError> {
        let mut conn = self.pool.get().await?;

        users::table
            .filter(users::username.eq(username))
            .first::<UserRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(User::from))
    }
}
