//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use postboard_app::ports::{PostRepository, UserRepository};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the users and posts API at the root next to `/health`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<UR, PR>(state: AppState<UR, PR>) -> Router
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
