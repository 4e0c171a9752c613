//! Post repository: feeds, editing, and the like toggle.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::models::{NewLike, NewPost, PostRecord};
use super::pool::{AsyncSqlitePool, DieselError};
use super::parse_datetime;
use crate::models::Post;
use crate::schema::{likes, posts, users};

impl From<PostRecord> for Post {
    fn from(record: PostRecord) -> Self {
        Post {
            id: record.id,
            author_id: record.author_id,
            content: record.content,
            created_at: parse_datetime(&record.created_at),
        }
    }
}

/// A post joined with its author's username, as feeds render it.
#[derive(Debug, Clone)]
pub struct AuthoredPost {
    pub post: Post,
    pub author: String,
}

/// Repository for posts and likes.
#[derive(Clone)]
pub struct PostRepository {
    pool: AsyncSqlitePool,
}

impl PostRepository {
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Create a post and return it.
    pub async fn create(&self, author_id: i64, content: &str) -> Result<Post, DieselError> {
        let mut conn = self.pool.get().await?;

        let created_at = Utc::now().to_rfc3339();
        diesel::insert_into(posts::table)
            .values(NewPost {
                author_id,
                content,
                created_at: &created_at,
            })
            .returning(PostRecord::as_returning())
            .get_result::<PostRecord>(&mut conn)
            .await
            .map(Post::from)
    }

    /// Get a post by ID.
    pub async fn get(&self, id: i64) -> Result<Option<Post>, DieselError> {
        let mut conn = self.pool.get().await?;

        posts::table
            .find(id)
            .first::<PostRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(Post::from))
    }

    /// Replace a post's content.
    pub async fn update_content(&self, id: i64, content: &str) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;

        diesel::update(posts::table.find(id))
            .set(posts::content.eq(content))
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    /// Count all posts.
    pub async fn count_all(&self) -> Result<i64, DieselError> {
        let mut conn = self.pool.get().await?;

        posts::table.count().get_result(&mut conn).await
    }

    /// Count posts by one author.
    pub async fn count_by_author(&self, author_id: i64) -> Result<i64, DieselError> {
        let mut conn = self.pool.get().await?;

        posts::table
            .filter(posts::author_id.eq(author_id))
            .count()
            .get_result(&mut conn)
            .await
    }

    /// Count posts by any of the given authors.
    pub async fn count_by_authors(&self, author_ids: &[i64]) -> Result<i64, DieselError> {
        if author_ids.is_empty() {
            return Ok(0);
        }
        let mut conn = self.pool.get().await?;

        posts::table
            .filter(posts::author_id.eq_any(author_ids))
            .count()
            .get_result(&mut conn)
            .await
    }

    /// One page of all posts, newest first.
    pub async fn page_all(&self, limit: i64, offset: i64) -> Result<Vec<AuthoredPost>, DieselError> {
        let mut conn = self.pool.get().await?;

        posts::table
            .inner_join(users::table)
            .select((PostRecord::as_select(), users::username))
            .order((posts::created_at.desc(), posts::id.desc()))
            .limit(limit)
            .offset(offset)
            .load::<(PostRecord, String)>(&mut conn)
            .await
            .map(into_authored)
    }

    /// One page of a single author's posts, newest first.
    pub async fn page_by_author(
        &self,
        author_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AuthoredPost>, DieselError> {
        let mut conn = self.pool.get().await?;

        posts::table
            .inner_join(users::table)
            .filter(posts::author_id.eq(author_id))
            .select((PostRecord::as_select(), users::username))
            .order((posts::created_at.desc(), posts::id.desc()))
            .limit(limit)
            .offset(offset)
            .load::<(PostRecord, String)>(&mut conn)
            .await
            .map(into_authored)
    }

    /// One page of posts by any of the given authors, newest first.
    /// Used for the following feed.
    pub async fn page_by_authors(
        &self,
        author_ids: &[i64],
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AuthoredPost>, DieselError> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await?;

        posts::table
            .inner_join(users::table)
            .filter(posts::author_id.eq_any(author_ids))
            .select((PostRecord::as_select(), users::username))
            .order((posts::created_at.desc(), posts::id.desc()))
            .limit(limit)
            .offset(offset)
            .load::<(PostRecord, String)>(&mut conn)
            .await
            .map(into_authored)
    }

    /// Number of likes on a post.
    pub async fn like_count(&self, post_id: i64) -> Result<i64, DieselError> {
        let mut conn = self.pool.get().await?;

        likes::table
            .filter(likes::post_id.eq(post_id))
            .count()
            .get_result(&mut conn)
            .await
    }

    /// Whether the given user has liked the post.
    pub async fn user_likes(&self, user_id: i64, post_id: i64) -> Result<bool, DieselError> {
        let mut conn = self.pool.get().await?;

        let count: i64 = likes::table
            .filter(likes::post_id.eq(post_id))
            .filter(likes::user_id.eq(user_id))
            .count()
            .get_result(&mut conn)
            .await?;
        Ok(count > 0)
    }

    /// Toggle the user's like on a post and return the new like count.
    ///
    /// Removes the like if present, adds it otherwise - the same
    /// add-or-remove semantics the like button expects.
    pub async fn toggle_like(&self, user_id: i64, post_id: i64) -> Result<i64, DieselError> {
        let mut conn = self.pool.get().await?;

        let removed = diesel::delete(
            likes::table
                .filter(likes::post_id.eq(post_id))
                .filter(likes::user_id.eq(user_id)),
        )
        .execute(&mut conn)
        .await?;

        if removed == 0 {
            let created_at = Utc::now().to_rfc3339();
            diesel::insert_into(likes::table)
                .values(NewLike {
                    user_id,
                    post_id,
                    created_at: &created_at,
                })
                .execute(&mut conn)
                .await?;
        }

        likes::table
            .filter(likes::post_id.eq(post_id))
            .count()
            .get_result(&mut conn)
            .await
    }
}

fn into_authored(rows: Vec<(PostRecord, String)>) -> Vec<AuthoredPost> {
    rows.into_iter()
        .map(|(record, author)| AuthoredPost {
            post: Post::from(record),
            author,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::repository::DbContext;
    use tempfile::tempdir;

    async fn setup() -> (DbContext, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let ctx = DbContext::new(&dir.path().join("test.db"));
        ctx.init_schema().await.unwrap();
        (ctx, dir)
    }

    #[tokio::test]
    async fn test_create_edit_and_get() {
        let (ctx, _dir) = setup().await;
        let user = ctx.users().create("alice", "a@example.com", "h").await.unwrap();
        let posts = ctx.posts();

        let post = posts.create(user.id, "first").await.unwrap();
        posts.update_content(post.id, "edited").await.unwrap();

        let loaded = posts.get(post.id).await.unwrap().unwrap();
        assert_eq!(loaded.content, "edited");
        assert!(posts.get(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_returns_the_inserted_row() {
        let (ctx, _dir) = setup().await;
        let user = ctx.users().create("alice", "a@example.com", "h").await.unwrap();
        let posts = ctx.posts();

        let first = posts.create(user.id, "one").await.unwrap();
        let second = posts.create(user.id, "two").await.unwrap();

        assert_eq!(first.content, "one");
        assert_eq!(second.content, "two");
        assert_ne!(first.id, second.id);
        assert_eq!(posts.get(first.id).await.unwrap().unwrap().content, "one");
    }

    #[tokio::test]
    async fn test_toggle_like_round_trip() {
        let (ctx, _dir) = setup().await;
        let alice = ctx.users().create("alice", "a@example.com", "h").await.unwrap();
        let bob = ctx.users().create("bob", "b@example.com", "h").await.unwrap();
        let posts = ctx.posts();
        let post = posts.create(alice.id, "likeable").await.unwrap();

        assert_eq!(posts.toggle_like(bob.id, post.id).await.unwrap(), 1);
        assert_eq!(posts.toggle_like(alice.id, post.id).await.unwrap(), 2);
        assert_eq!(posts.toggle_like(bob.id, post.id).await.unwrap(), 1);
        assert!(posts.user_likes(alice.id, post.id).await.unwrap());
        assert!(!posts.user_likes(bob.id, post.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_paging_is_newest_first() {
        let (ctx, _dir) = setup().await;
        let user = ctx.users().create("alice", "a@example.com", "h").await.unwrap();
        let posts = ctx.posts();
        for i in 0..12 {
            posts.create(user.id, &format!("post-{i}")).await.unwrap();
        }

        assert_eq!(posts.count_all().await.unwrap(), 12);
        let page = posts.page_all(10, 0).await.unwrap();
        assert_eq!(page.len(), 10);
        assert_eq!(page[0].post.content, "post-11");
        assert_eq!(page[0].author, "alice");

        let rest = posts.page_all(10, 10).await.unwrap();
        assert_eq!(rest.len(), 2);
        assert_eq!(rest[1].post.content, "post-0");
    }

    #[tokio::test]
    async fn test_page_by_authors_empty_list() {
        let (ctx, _dir) = setup().await;
        assert!(ctx.posts().page_by_authors(&[], 10, 0).await.unwrap().is_empty());
        assert_eq!(ctx.posts().count_by_authors(&[]).await.unwrap(), 0);
    }
}
