//! Login session repository.

use chrono::{Duration, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::models::{NewSession, SessionRecord};
use super::pool::{AsyncSqlitePool, DieselError};
use super::parse_datetime;
use crate::auth::new_session_token;
use crate::models::Session;

use crate::schema::sessions;

impl From<SessionRecord> for Session {
    fn from(record: SessionRecord) -> Self {
        Session {
            token: record.token,
            user_id: record.user_id,
            created_at: parse_datetime(&record.created_at),
            expires_at: parse_datetime(&record.expires_at),
        }
    }
}

/// Repository for login sessions.
#[derive(Clone)]
pub struct SessionRepository {
    pool: AsyncSqlitePool,
}

impl SessionRepository {
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Mint a session for the user, valid for `ttl_days`.
    pub async fn create(&self, user_id: i64, ttl_days: i64) -> Result<Session, DieselError> {
        let mut conn = self.pool.get().await?;

        let token = new_session_token();
        let now = Utc::now();
        let expires = now + Duration::days(ttl_days);
        let created_at = now.to_rfc3339();
        let expires_at = expires.to_rfc3339();

        diesel::insert_into(sessions::table)
            .values(NewSession {
                token: &token,
                user_id,
                created_at: &created_at,
                expires_at: &expires_at,
            })
            .execute(&mut conn)
            .await?;

        Ok(Session {
            token,
            user_id,
            created_at: now,
            expires_at: expires,
        })
    }

    /// Look up a live session. Expired tokens are deleted and read as absent.
    pub async fn get(&self, token: &str) -> Result<Option<Session>, DieselError> {
        let mut conn = self.pool.get().await?;

        let record = sessions::table
            .find(token)
            .first::<SessionRecord>(&mut conn)
            .await
            .optional()?;

        let Some(record) = record else {
            return Ok(None);
        };

        let session = Session::from(record);
        if session.is_expired(Utc::now()) {
            diesel::delete(sessions::table.find(token))
                .execute(&mut conn)
                .await?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Delete a session (logout).
    pub async fn delete(&self, token: &str) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;

        diesel::delete(sessions::table.find(token))
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    /// Drop every expired session. RFC 3339 UTC strings compare
    /// lexicographically in time order.
    pub async fn purge_expired(&self) -> Result<usize, DieselError> {
        let mut conn = self.pool.get().await?;

        let now = Utc::now().to_rfc3339();
        diesel::delete(sessions::table.filter(sessions::expires_at.le(now)))
            .execute(&mut conn)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::DbContext;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let dir = tempdir().unwrap();
        let ctx = DbContext::new(&dir.path().join("test.db"));
        ctx.init_schema().await.unwrap();
        let user = ctx.users().create("alice", "a@example.com", "h").await.unwrap();
        let sessions = ctx.sessions();

        let session = sessions.create(user.id, 30).await.unwrap();
        let live = sessions.get(&session.token).await.unwrap().unwrap();
        assert_eq!(live.user_id, user.id);

        sessions.delete(&session.token).await.unwrap();
        assert!(sessions.get(&session.token).await.unwrap().is_none());
        assert!(sessions.get("no-such-token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_session_reads_as_absent() {
        let dir = tempdir().unwrap();
        let ctx = DbContext::new(&dir.path().join("test.db"));
        ctx.init_schema().await.unwrap();
        let user = ctx.users().create("alice", "a@example.com", "h").await.unwrap();
        let sessions = ctx.sessions();

        // Zero TTL: expires immediately
        let session = sessions.create(user.id, 0).await.unwrap();
        assert!(sessions.get(&session.token).await.unwrap().is_none());
    }
}
