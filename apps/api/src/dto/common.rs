use pitchdesk_core::AdminIdentity;
use serde::Serialize;

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// API representation of the authenticated admin.
#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub subject: String,
    pub name: String,
    pub role: String,
}

impl From<AdminIdentity> for IdentityResponse {
    fn from(identity: AdminIdentity) -> Self {
        Self {
            subject: identity.subject().to_owned(),
            name: identity.display_name().to_owned(),
            role: identity.role().to_owned(),
        }
    }
}
