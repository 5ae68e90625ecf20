//! User service — use-cases for managing users.

use postboard_domain::error::{NotFoundError, PostboardError};
use postboard_domain::id::UserId;
use postboard_domain::time::now;
use postboard_domain::user::{User, UserDraft, UserSummary};

use crate::ports::UserRepository;

/// Application service for user CRUD operations.
pub struct UserService<R> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new user after validating domain invariants.
    ///
    /// Email uniqueness is left to the repository, which reports a
    /// collision as a conflict.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::Validation`] if invariants fail,
    /// [`PostboardError::Conflict`] if the email is taken, or a storage error
    /// propagated from the repository.
    #[tracing::instrument(skip(self, draft), fields(user_email = %draft.email))]
    pub async fn create_user(&self, draft: UserDraft) -> Result<User, PostboardError> {
        let user = User::from_draft(draft, now());
        user.validate()?;
        self.repo.create(user).await
    }

    /// List all users with a summary of their posts.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_users(&self) -> Result<Vec<UserSummary>, PostboardError> {
        self.repo.get_all_with_posts().await
    }

    /// Look up a user by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::NotFound`] when no user with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_user(&self, id: UserId) -> Result<User, PostboardError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError::User(id.to_string()).into())
    }

    /// Overwrite the name, email and (when given) role of an existing user.
    ///
    /// Existence is decided by the update itself, so there is no window
    /// between the check and the write.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::Validation`] if invariants fail,
    /// [`PostboardError::NotFound`] when no user with `id` exists,
    /// [`PostboardError::Conflict`] if the new email is taken, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, draft))]
    pub async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<User, PostboardError> {
        draft.validate()?;
        self.repo
            .update(id, draft, now())
            .await?
            .ok_or_else(|| NotFoundError::UserToUpdate(id.to_string()).into())
    }

    /// Delete a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::NotFound`] when no user with `id` exists,
    /// or a storage error from the repository (including a user that still
    /// owns posts).
    #[tracing::instrument(skip(self))]
    pub async fn delete_user(&self, id: UserId) -> Result<(), PostboardError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(NotFoundError::User(id.to_string()).into())
        }
    }
}
