//! Follow relationship repository.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::models::NewFollow;
use super::pool::{AsyncSqlitePool, DieselError};
use crate::schema::follows;

/// Repository for follow relationships.
#[derive(Clone)]
pub struct FollowRepository {
    pool: AsyncSqlitePool,
}

impl FollowRepository {
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Record that `follower_id` follows `followed_id`. Idempotent: the
    /// unique pair constraint makes a repeat insert a no-op.
    pub async fn follow(&self, follower_id: i64, followed_id: i64) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;

        let created_at = Utc::now().to_rfc3339();
        diesel::insert_or_ignore_into(follows::table)
            .values(NewFollow {
                follower_id,
                followed_id,
                created_at: &created_at,
            })
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    /// Remove the relationship if present.
    pub async fn unfollow(&self, follower_id: i64, followed_id: i64) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;

        diesel::delete(
            follows::table
                .filter(follows::follower_id.eq(follower_id))
                .filter(follows::followed_id.eq(followed_id)),
        )
        .execute(&mut conn)
        .await?;
        Ok(())
    }

    /// Whether `follower_id` currently follows `followed_id`.
    pub async fn is_following(&self, follower_id: i64, followed_id: i64) -> Result<bool, DieselError> {
        let mut conn = self.pool.get().await?;

        let count: i64 = follows::table
            .filter(follows::follower_id.eq(follower_id))
            .filter(follows::followed_id.eq(followed_id))
            .count()
            .get_result(&mut conn)
            .await?;
        Ok(count > 0)
    }

    /// Number of users following `user_id`.
    pub async fn follower_count(&self, user_id: i64) -> Result<i64, DieselError> {
        let mut conn = self.pool.get().await?;

        follows::table
            .filter(follows::followed_id.eq(user_id))
            .count()
            .get_result(&mut conn)
            .await
    }

    /// Number of users `user_id` follows.
    pub async fn following_count(&self, user_id: i64) -> Result<i64, DieselError> {
        let mut conn = self.pool.get().await?;

        follows::table
            .filter(follows::follower_id.eq(user_id))
            .count()
            .get_result(&mut conn)
            .await
    }

    /// IDs of every user `user_id` follows. Feeds the following page.
    pub async fn following_ids(&self, user_id: i64) -> Result<Vec<i64>, DieselError> {
        let mut conn = self.pool.get().await?;

        follows::table
            .filter(follows::follower_id.eq(user_id))
            .select(follows::followed_id)
            .load::<i64>(&mut conn)
            .await
    }
}
