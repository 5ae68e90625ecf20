//! `SQLite` implementation of [`UserRepository`].

use std::collections::HashMap;
use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use postboard_app::ports::UserRepository;
use postboard_domain::error::{ConflictError, PostboardError};
use postboard_domain::id::UserId;
use postboard_domain::post::PostSummary;
use postboard_domain::time::{Timestamp, to_sortable};
use postboard_domain::user::{User, UserDraft, UserSummary};

use crate::decode;
use crate::error::{StorageError, is_unique_violation};

/// Wrapper for converting database rows into domain [`User`].
pub(crate) struct Wrapper(pub(crate) User);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<User> {
        value.map(|w| w.0)
    }

    /// Decode a user whose columns carry `prefix` (e.g. `author_`).
    pub(crate) fn from_prefixed_row(row: &SqliteRow, prefix: &str) -> Result<Self, sqlx::Error> {
        let column = |name: &str| format!("{prefix}{name}");
        let uuid: String = row.try_get(column("uuid").as_str())?;
        let name: String = row.try_get(column("name").as_str())?;
        let email: String = row.try_get(column("email").as_str())?;
        let role: String = row.try_get(column("role").as_str())?;
        let created_at: String = row.try_get(column("created_at").as_str())?;
        let updated_at: String = row.try_get(column("updated_at").as_str())?;

        Ok(Self(User {
            uuid: decode::parse(&uuid)?,
            name,
            email,
            role: decode::parse(&role)?,
            created_at: decode::timestamp(&created_at)?,
            updated_at: decode::timestamp(&updated_at)?,
        }))
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Self::from_prefixed_row(row, "")
    }
}

const INSERT: &str = r"
    INSERT INTO users (uuid, name, email, role, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM users WHERE uuid = ?";
const SELECT_SUMMARIES: &str = "SELECT uuid, name, role FROM users ORDER BY created_at, rowid";
const SELECT_POST_SUMMARIES: &str =
    "SELECT author_id, title, content FROM posts ORDER BY created_at, rowid";
const UPDATE: &str = r"
    UPDATE users
    SET name = ?, email = ?, role = COALESCE(?, role), updated_at = ?
    WHERE uuid = ?
    RETURNING *
";
const DELETE_BY_ID: &str = "DELETE FROM users WHERE uuid = ?";

/// Map a write failure, turning an email collision into a conflict.
fn write_error(err: sqlx::Error) -> PostboardError {
    if is_unique_violation(&err) {
        tracing::debug!(%err, "email uniqueness violated");
        ConflictError::EmailTaken.into()
    } else {
        StorageError::from(err).into()
    }
}

/// `SQLite`-backed user repository.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    fn create(&self, user: User) -> impl Future<Output = Result<User, PostboardError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(user.uuid.to_string())
                .bind(&user.name)
                .bind(&user.email)
                .bind(user.role.as_str())
                .bind(to_sortable(user.created_at))
                .bind(to_sortable(user.updated_at))
                .execute(&pool)
                .await
                .map_err(write_error)?;

            Ok(user)
        }
    }

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, PostboardError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all_with_posts(
        &self,
    ) -> impl Future<Output = Result<Vec<UserSummary>, PostboardError>> + Send {
        let pool = self.pool.clone();
        async move {
            let users = sqlx::query(SELECT_SUMMARIES)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;
            let posts = sqlx::query(SELECT_POST_SUMMARIES)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            let mut summaries = Vec::with_capacity(users.len());
            let mut index: HashMap<String, usize> = HashMap::with_capacity(users.len());
            for row in users {
                let uuid: String = row.try_get("uuid").map_err(StorageError::from)?;
                let role: String = row.try_get("role").map_err(StorageError::from)?;
                summaries.push(UserSummary {
                    uuid: decode::parse(&uuid).map_err(StorageError::from)?,
                    name: row.try_get("name").map_err(StorageError::from)?,
                    role: decode::parse(&role).map_err(StorageError::from)?,
                    posts: Vec::new(),
                });
                index.insert(uuid, summaries.len() - 1);
            }

            for row in posts {
                let author_id: String = row.try_get("author_id").map_err(StorageError::from)?;
                if let Some(&position) = index.get(&author_id) {
                    summaries[position].posts.push(PostSummary {
                        title: row.try_get("title").map_err(StorageError::from)?,
                        content: row.try_get("content").map_err(StorageError::from)?,
                    });
                }
            }

            Ok(summaries)
        }
    }

    fn update(
        &self,
        id: UserId,
        draft: UserDraft,
        updated_at: Timestamp,
    ) -> impl Future<Output = Result<Option<User>, PostboardError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(UPDATE)
                .bind(&draft.name)
                .bind(&draft.email)
                .bind(draft.role.map(|role| role.as_str()))
                .bind(to_sortable(updated_at))
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(write_error)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn delete(&self, id: UserId) -> impl Future<Output = Result<bool, PostboardError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use postboard_domain::time::now;
    use postboard_domain::user::Role;

    async fn setup() -> SqliteUserRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteUserRepository::new(db.pool().clone())
    }

    fn test_user(email: &str) -> User {
        User::from_draft(
            UserDraft {
                name: "Ada".to_string(),
                email: email.to_string(),
                role: Some(Role::Admin),
            },
            now(),
        )
    }

    #[tokio::test]
    async fn should_create_and_retrieve_user_when_valid() {
        let repo = setup().await;
        let user = test_user("ada@example.com");
        let id = user.uuid;

        repo.create(user.clone()).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.uuid, id);
        assert_eq!(fetched.email, "ada@example.com");
        assert_eq!(fetched.role, Role::Admin);
        assert_eq!(fetched.created_at, user.created_at);
    }

    #[tokio::test]
    async fn should_return_none_when_user_not_found() {
        let repo = setup().await;
        let result = repo.get_by_id(UserId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_report_conflict_when_email_is_taken() {
        let repo = setup().await;
        repo.create(test_user("ada@example.com")).await.unwrap();

        let result = repo.create(test_user("ada@example.com")).await;
        assert!(matches!(
            result,
            Err(PostboardError::Conflict(ConflictError::EmailTaken))
        ));
        assert_eq!(repo.get_all_with_posts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_update_and_keep_role_when_none_given() {
        let repo = setup().await;
        let user = test_user("ada@example.com");
        let id = user.uuid;
        repo.create(user).await.unwrap();

        let draft = UserDraft {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            role: None,
        };
        let updated = repo.update(id, draft, now()).await.unwrap().unwrap();

        assert_eq!(updated.name, "Grace");
        assert_eq!(updated.email, "grace@example.com");
        assert_eq!(updated.role, Role::Admin);
    }

    #[tokio::test]
    async fn should_return_none_when_updating_missing_user() {
        let repo = setup().await;
        let draft = UserDraft {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            role: Some(Role::User),
        };
        let result = repo.update(UserId::new(), draft, now()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_report_conflict_when_update_reuses_email() {
        let repo = setup().await;
        repo.create(test_user("ada@example.com")).await.unwrap();
        let other = test_user("grace@example.com");
        let other_id = other.uuid;
        repo.create(other).await.unwrap();

        let draft = UserDraft {
            name: "Grace".to_string(),
            email: "ada@example.com".to_string(),
            role: None,
        };
        let result = repo.update(other_id, draft, now()).await;
        assert!(matches!(result, Err(PostboardError::Conflict(_))));
    }

    #[tokio::test]
    async fn should_delete_user_when_exists() {
        let repo = setup().await;
        let user = test_user("ada@example.com");
        let id = user.uuid;
        repo.create(user).await.unwrap();

        assert!(repo.delete(id).await.unwrap());
        assert!(repo.get_by_id(id).await.unwrap().is_none());
        assert!(!repo.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn should_list_users_with_their_posts() {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        let repo = SqliteUserRepository::new(db.pool().clone());

        let ada = test_user("ada@example.com");
        let grace = test_user("grace@example.com");
        repo.create(ada.clone()).await.unwrap();
        repo.create(grace.clone()).await.unwrap();

        sqlx::query(
            "INSERT INTO posts (uuid, title, content, author_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_string())
        .bind("Hello")
        .bind(Some("World"))
        .bind(ada.uuid.to_string())
        .bind(to_sortable(now()))
        .bind(to_sortable(now()))
        .execute(db.pool())
        .await
        .unwrap();

        let all = repo.get_all_with_posts().await.unwrap();
        assert_eq!(all.len(), 2);

        let ada_summary = all.iter().find(|u| u.uuid == ada.uuid).unwrap();
        assert_eq!(
            ada_summary.posts,
            vec![PostSummary {
                title: "Hello".to_string(),
                content: Some("World".to_string()),
            }]
        );
        let grace_summary = all.iter().find(|u| u.uuid == grace.uuid).unwrap();
        assert!(grace_summary.posts.is_empty());
    }

    fn uuid_string() -> String {
        postboard_domain::id::PostId::new().to_string()
    }
}
