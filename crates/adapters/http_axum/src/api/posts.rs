//! JSON REST handlers for posts.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use postboard_app::ports::{PostRepository, UserRepository};
use postboard_domain::post::{Post, PostDraft, PostWithAuthor};

use crate::api::json_body;
use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<PostWithAuthor>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Ok(Json<Post>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /posts`
///
/// Every failure, an unknown author included, answers 400.
pub async fn create<UR, PR>(
    State(state): State<AppState<UR, PR>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
{
    let body = json_body(body)?;
    let draft = PostDraft::from_body(&body)?;
    let created = state
        .post_service
        .create_post(draft)
        .await
        .map_err(|err| ApiError::from(err).with_failure_status(StatusCode::BAD_REQUEST))?;
    Ok(CreateResponse::Ok(Json(created)))
}

/// `GET /posts`
///
/// A failure answers 404 `User not found`.
pub async fn list<UR, PR>(
    State(state): State<AppState<UR, PR>>,
) -> Result<ListResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
{
    let posts = state
        .post_service
        .list_posts()
        .await
        .map_err(|err| ApiError::from(err).as_missing_user())?;
    Ok(ListResponse::Ok(Json(posts)))
}
