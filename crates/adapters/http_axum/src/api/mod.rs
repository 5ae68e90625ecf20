//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod posts;
#[allow(clippy::missing_errors_doc)]
pub mod users;

use axum::Json;
use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::routing::get;
use serde_json::Value;

use postboard_app::ports::{PostRepository, UserRepository};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the users and posts sub-router.
pub fn routes<UR, PR>() -> Router<AppState<UR, PR>>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
{
    Router::new()
        // Users
        .route(
            "/users",
            get(users::list::<UR, PR>).post(users::create::<UR, PR>),
        )
        .route(
            "/users/{uuid}",
            get(users::get::<UR, PR>)
                .put(users::update::<UR, PR>)
                .delete(users::delete::<UR, PR>),
        )
        // Posts
        .route(
            "/posts",
            get(posts::list::<UR, PR>).post(posts::create::<UR, PR>),
        )
}

/// Unwrap a JSON body, turning a malformed payload into a validation error.
pub(crate) fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    body.map(|Json(value)| value).map_err(ApiError::from)
}
