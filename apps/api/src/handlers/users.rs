use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::{CreateUserRequest, UserResponse};
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

/// GET /api/users - List all user accounts, newest first.
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /api/users - Create a user account.
pub async fn create_user_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state.user_service.create_user(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
