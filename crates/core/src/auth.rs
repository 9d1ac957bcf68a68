use serde::{Deserialize, Serialize};

/// Admin user information persisted in the authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    subject: String,
    display_name: String,
    role: String,
}

impl AdminIdentity {
    /// Creates an identity from authentication data.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        display_name: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            display_name: display_name.into(),
            role: role.into(),
        }
    }

    /// Returns the stable subject claim (the user id).
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the role string stored at login time.
    #[must_use]
    pub fn role(&self) -> &str {
        self.role.as_str()
    }
}
