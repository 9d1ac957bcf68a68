use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pitchdesk_application::{CreateUserParams, UserSummary};
use pitchdesk_domain::Role;

/// Payload for creating a user account.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub role: Option<Role>,
}

impl From<CreateUserRequest> for CreateUserParams {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            username: request.username,
            password: request.password,
            role: request.role,
        }
    }
}

/// API representation of a user account, without credential data.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<UserSummary> for UserResponse {
    fn from(summary: UserSummary) -> Self {
        Self {
            id: summary.id.as_uuid(),
            name: summary.name,
            email: summary.email,
            username: summary.username,
            role: summary.role,
            created_at: summary.created_at,
        }
    }
}
