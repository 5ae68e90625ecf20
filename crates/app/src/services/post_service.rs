//! Post service — use-cases for publishing and listing posts.

use postboard_domain::error::PostboardError;
use postboard_domain::post::{Post, PostDraft, PostWithAuthor};
use postboard_domain::time::now;

use crate::ports::PostRepository;

/// Application service for posts.
pub struct PostService<R> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Publish a post linked to an existing author.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::Validation`] if invariants fail,
    /// [`PostboardError::NotFound`] when the author does not exist, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, draft), fields(author_id = %draft.author_id))]
    pub async fn create_post(&self, draft: PostDraft) -> Result<Post, PostboardError> {
        let post = Post::from_draft(draft, now());
        post.validate()?;
        self.repo.create(post).await
    }

    /// List all posts with their author, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_posts(&self) -> Result<Vec<PostWithAuthor>, PostboardError> {
        self.repo.get_all_with_author().await
    }
}
