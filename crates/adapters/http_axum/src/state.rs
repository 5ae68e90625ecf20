//! Shared application state for axum handlers.

use std::sync::Arc;

use postboard_app::ports::{PostRepository, UserRepository};
use postboard_app::services::post_service::PostService;
use postboard_app::services::user_service::UserService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types. `Clone` only clones the `Arc`s, so
/// the repositories need not be `Clone`.
pub struct AppState<UR, PR> {
    /// User CRUD service.
    pub user_service: Arc<UserService<UR>>,
    /// Post service.
    pub post_service: Arc<PostService<PR>>,
}

impl<UR, PR> Clone for AppState<UR, PR> {
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            post_service: Arc::clone(&self.post_service),
        }
    }
}

impl<UR, PR> AppState<UR, PR>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(user_service: UserService<UR>, post_service: PostService<PR>) -> Self {
        Self {
            user_service: Arc::new(user_service),
            post_service: Arc::new(post_service),
        }
    }
}
