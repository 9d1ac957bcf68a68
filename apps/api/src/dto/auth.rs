use serde::{Deserialize, Serialize};

use super::IdentityResponse;

/// Payload for the login endpoint.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    pub user: IdentityResponse,
}
