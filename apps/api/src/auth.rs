//! Session-based login, logout, and identity endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use pitchdesk_application::LoginOutcome;
use pitchdesk_core::{AdminIdentity, AppError};
use tower_sessions::Session;

use crate::dto::{IdentityResponse, LoginRequest, LoginResponse};
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

pub const SESSION_USER_KEY: &str = "user_identity";
/// Absolute session creation timestamp for OWASP absolute timeout enforcement.
pub const SESSION_CREATED_AT_KEY: &str = "session_created_at";

/// POST /auth/login - Authenticate with username+password.
///
/// Failure responses deliberately collapse unknown usernames and wrong
/// passwords into the same message; lockout responses use 429.
pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let outcome = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    match outcome {
        LoginOutcome::Accepted(account) => {
            let identity = AdminIdentity::new(
                account.id.to_string(),
                account.name,
                account.role.as_str(),
            );

            // OWASP Session Management: regenerate session ID on privilege change.
            session.cycle_id().await.map_err(|error| {
                AppError::Internal(format!("failed to cycle session id: {error}"))
            })?;

            session
                .insert(SESSION_USER_KEY, &identity)
                .await
                .map_err(|error| {
                    AppError::Internal(format!("failed to persist session identity: {error}"))
                })?;

            // OWASP Session Management: record absolute creation time.
            session
                .insert(SESSION_CREATED_AT_KEY, chrono::Utc::now().timestamp())
                .await
                .map_err(|error| {
                    AppError::Internal(format!("failed to persist session creation time: {error}"))
                })?;

            Ok(Json(LoginResponse {
                status: "authenticated",
                user: IdentityResponse::from(identity),
            }))
        }
        LoginOutcome::WrongPassword { remaining_attempts } => Err(AppError::Unauthorized(format!(
            "username or password incorrect, {remaining_attempts} attempts remaining"
        ))
        .into()),
        LoginOutcome::UnknownUser => {
            Err(AppError::Unauthorized("username or password incorrect".to_owned()).into())
        }
        LoginOutcome::LockTripped { lock_seconds } => {
            tracing::warn!(username = %payload.username, lock_seconds, "account lockout tripped");
            Err(AppError::RateLimited(format!(
                "too many failed attempts, account locked for {lock_seconds} seconds"
            ))
            .into())
        }
        LoginOutcome::Locked { remaining_seconds } => Err(AppError::RateLimited(format!(
            "account locked, try again in {remaining_seconds} seconds"
        ))
        .into()),
    }
}

/// POST /auth/logout - Destroy the current session.
pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /auth/me - Return the authenticated admin identity.
pub async fn me_handler(session: Session) -> ApiResult<Json<IdentityResponse>> {
    let identity = session
        .get::<AdminIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    Ok(Json(IdentityResponse::from(identity)))
}
