//! `SQLite` implementation of [`PostRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use postboard_app::ports::PostRepository;
use postboard_domain::error::{NotFoundError, PostboardError};
use postboard_domain::post::{Post, PostWithAuthor};
use postboard_domain::time::to_sortable;

use crate::decode;
use crate::error::{StorageError, is_foreign_key_violation};
use crate::user_repo;

/// Wrapper for converting joined post/author rows into [`PostWithAuthor`].
struct Wrapper(PostWithAuthor);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let uuid: String = row.try_get("uuid")?;
        let title: String = row.try_get("title")?;
        let content: Option<String> = row.try_get("content")?;
        let author_id: String = row.try_get("author_id")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        let post = Post {
            uuid: decode::parse(&uuid)?,
            title,
            content,
            author_id: decode::parse(&author_id)?,
            created_at: decode::timestamp(&created_at)?,
            updated_at: decode::timestamp(&updated_at)?,
        };
        let author = user_repo::Wrapper::from_prefixed_row(row, "author_")?.0;

        Ok(Self(PostWithAuthor { post, author }))
    }
}

const INSERT: &str = r"
    INSERT INTO posts (uuid, title, content, author_id, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?)
";

const SELECT_ALL_WITH_AUTHOR: &str = r"
    SELECT p.uuid, p.title, p.content, p.author_id, p.created_at, p.updated_at,
           u.uuid AS author_uuid,
           u.name AS author_name,
           u.email AS author_email,
           u.role AS author_role,
           u.created_at AS author_created_at,
           u.updated_at AS author_updated_at
    FROM posts p
    JOIN users u ON u.uuid = p.author_id
    ORDER BY p.created_at DESC, p.rowid DESC
";

/// `SQLite`-backed post repository.
pub struct SqlitePostRepository {
    pool: SqlitePool,
}

impl SqlitePostRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl PostRepository for SqlitePostRepository {
    fn create(&self, post: Post) -> impl Future<Output = Result<Post, PostboardError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(post.uuid.to_string())
                .bind(&post.title)
                .bind(&post.content)
                .bind(post.author_id.to_string())
                .bind(to_sortable(post.created_at))
                .bind(to_sortable(post.updated_at))
                .execute(&pool)
                .await;

            match result {
                Ok(_) => Ok(post),
                Err(err) if is_foreign_key_violation(&err) => {
                    tracing::debug!(%err, author_id = %post.author_id, "post author missing");
                    Err(NotFoundError::Author(post.author_id.to_string()).into())
                }
                Err(err) => Err(StorageError::from(err).into()),
            }
        }
    }

    fn get_all_with_author(
        &self,
    ) -> impl Future<Output = Result<Vec<PostWithAuthor>, PostboardError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL_WITH_AUTHOR)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use crate::user_repo::SqliteUserRepository;
    use postboard_app::ports::UserRepository;
    use postboard_domain::id::UserId;
    use postboard_domain::post::PostDraft;
    use postboard_domain::time::now;
    use postboard_domain::user::{User, UserDraft};

    async fn setup() -> (SqliteUserRepository, SqlitePostRepository) {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        (
            SqliteUserRepository::new(db.pool().clone()),
            SqlitePostRepository::new(db.pool().clone()),
        )
    }

    async fn create_author(users: &SqliteUserRepository) -> User {
        let author = User::from_draft(
            UserDraft {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                role: None,
            },
            now(),
        );
        users.create(author).await.unwrap()
    }

    fn test_post(title: &str, author_id: UserId) -> Post {
        Post::from_draft(
            PostDraft {
                title: title.to_string(),
                content: Some("content".to_string()),
                author_id,
            },
            now(),
        )
    }

    #[tokio::test]
    async fn should_create_post_and_list_it_with_author() {
        let (users, posts) = setup().await;
        let author = create_author(&users).await;
        let post = test_post("Hello", author.uuid);

        posts.create(post.clone()).await.unwrap();

        let all = posts.get_all_with_author().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].post, post);
        assert_eq!(all[0].author, author);
    }

    #[tokio::test]
    async fn should_report_missing_author() {
        let (_users, posts) = setup().await;

        let result = posts.create(test_post("Hello", UserId::new())).await;
        assert!(matches!(
            result,
            Err(PostboardError::NotFound(NotFoundError::Author(_)))
        ));
        assert!(posts.get_all_with_author().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_list_newest_first() {
        let (users, posts) = setup().await;
        let author = create_author(&users).await;

        for title in ["first", "second", "third"] {
            posts.create(test_post(title, author.uuid)).await.unwrap();
        }

        let titles: Vec<String> = posts
            .get_all_with_author()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.post.title)
            .collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn should_keep_content_empty_when_absent() {
        let (users, posts) = setup().await;
        let author = create_author(&users).await;
        let mut post = test_post("Hello", author.uuid);
        post.content = None;

        posts.create(post).await.unwrap();

        let all = posts.get_all_with_author().await.unwrap();
        assert!(all[0].post.content.is_none());
    }

    #[tokio::test]
    async fn should_refuse_to_delete_author_with_posts() {
        let (users, posts) = setup().await;
        let author = create_author(&users).await;
        posts.create(test_post("Hello", author.uuid)).await.unwrap();

        let result = users.delete(author.uuid).await;
        assert!(matches!(result, Err(PostboardError::Storage(_))));
        assert!(users.get_by_id(author.uuid).await.unwrap().is_some());
    }
}
