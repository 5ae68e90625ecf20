//! JSON REST handlers for users.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

use postboard_app::ports::{PostRepository, UserRepository};
use postboard_domain::error::{NotFoundError, PostboardError};
use postboard_domain::id::UserId;
use postboard_domain::user::{User, UserDraft, UserSummary};

use crate::api::json_body;
use crate::error::ApiError;
use crate::state::AppState;

/// Confirmation body returned after a delete.
#[derive(Debug, Serialize)]
pub struct DeletedMessage {
    pub message: &'static str,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<UserSummary>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the endpoints returning a single user.
pub enum UserResponse {
    Ok(Json<User>),
}

impl IntoResponse for UserResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Deleted,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Deleted => (
                StatusCode::OK,
                Json(DeletedMessage {
                    message: "User deleted successfully",
                }),
            )
                .into_response(),
        }
    }
}

/// Parse a path id; anything that is not a uuid names no user.
fn parse_id(raw: &str, missing: fn(String) -> NotFoundError) -> Result<UserId, ApiError> {
    UserId::from_str(raw)
        .map_err(|_| ApiError::from(PostboardError::from(missing(raw.to_string()))))
}

/// `POST /users`
pub async fn create<UR, PR>(
    State(state): State<AppState<UR, PR>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<UserResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
{
    let body = json_body(body)?;
    let draft = UserDraft::from_body(&body)?;
    let created = state
        .user_service
        .create_user(draft)
        .await
        .map_err(|err| ApiError::from(err).with_failure_status(StatusCode::BAD_REQUEST))?;
    Ok(UserResponse::Ok(Json(created)))
}

/// `GET /users`
pub async fn list<UR, PR>(
    State(state): State<AppState<UR, PR>>,
) -> Result<ListResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
{
    let users = state.user_service.list_users().await?;
    Ok(ListResponse::Ok(Json(users)))
}

/// `GET /users/:uuid`
///
/// Every failure answers 404 `User not found`.
pub async fn get<UR, PR>(
    State(state): State<AppState<UR, PR>>,
    Path(uuid): Path<String>,
) -> Result<UserResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
{
    let id = parse_id(&uuid, NotFoundError::User)?;
    let user = state
        .user_service
        .get_user(id)
        .await
        .map_err(|err| ApiError::from(err).as_missing_user())?;
    Ok(UserResponse::Ok(Json(user)))
}

/// `PUT /users/:uuid`
///
/// The body is validated before the id is looked at.
pub async fn update<UR, PR>(
    State(state): State<AppState<UR, PR>>,
    Path(uuid): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<UserResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
{
    let body = json_body(body)?;
    let draft = UserDraft::from_body(&body)?;
    let id = parse_id(&uuid, NotFoundError::UserToUpdate)?;
    let updated = state
        .user_service
        .update_user(id, draft)
        .await
        .map_err(|err| ApiError::from(err).with_failure_status(StatusCode::NOT_FOUND))?;
    Ok(UserResponse::Ok(Json(updated)))
}

/// `DELETE /users/:uuid`
pub async fn delete<UR, PR>(
    State(state): State<AppState<UR, PR>>,
    Path(uuid): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
{
    let opaque = |err: ApiError| err.opaque(StatusCode::INTERNAL_SERVER_ERROR);
    let id = parse_id(&uuid, NotFoundError::User).map_err(opaque)?;
    state
        .user_service
        .delete_user(id)
        .await
        .map_err(|err| opaque(err.into()))?;
    Ok(DeleteResponse::Deleted)
}
