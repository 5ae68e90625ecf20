//! Storage port — repository traits for persistence.
//!
//! Implementations surface constraint violations as domain errors:
//! a duplicate email is [`ConflictError::EmailTaken`] and a post whose
//! author does not exist is [`NotFoundError::Author`].
//!
//! [`ConflictError::EmailTaken`]: postboard_domain::error::ConflictError::EmailTaken
//! [`NotFoundError::Author`]: postboard_domain::error::NotFoundError::Author

use std::future::Future;

use postboard_domain::error::PostboardError;
use postboard_domain::id::UserId;
use postboard_domain::post::{Post, PostWithAuthor};
use postboard_domain::time::Timestamp;
use postboard_domain::user::{User, UserDraft, UserSummary};

/// Repository for persisting and querying [`User`]s.
pub trait UserRepository {
    /// Insert a new user. Fails with a conflict when the email is taken.
    fn create(&self, user: User) -> impl Future<Output = Result<User, PostboardError>> + Send;

    /// Get a user by its unique identifier.
    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, PostboardError>> + Send;

    /// Get every user with the title and content of their posts.
    fn get_all_with_posts(
        &self,
    ) -> impl Future<Output = Result<Vec<UserSummary>, PostboardError>> + Send;

    /// Overwrite name and email, and role when the draft carries one.
    ///
    /// Resolves to `None` when no user has `id`.
    fn update(
        &self,
        id: UserId,
        draft: UserDraft,
        updated_at: Timestamp,
    ) -> impl Future<Output = Result<Option<User>, PostboardError>> + Send;

    /// Delete a user. Resolves to `false` when no user has `id`.
    fn delete(&self, id: UserId) -> impl Future<Output = Result<bool, PostboardError>> + Send;
}

/// Repository for persisting and querying [`Post`]s.
pub trait PostRepository {
    /// Insert a new post. Fails with not-found when the author does not exist.
    fn create(&self, post: Post) -> impl Future<Output = Result<Post, PostboardError>> + Send;

    /// Get every post with its author, newest first.
    fn get_all_with_author(
        &self,
    ) -> impl Future<Output = Result<Vec<PostWithAuthor>, PostboardError>> + Send;
}
