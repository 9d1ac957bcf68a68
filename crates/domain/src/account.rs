//! Account domain types and login-lockout rules.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use pitchdesk_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random user identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a user identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Role assigned to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Back-office administrator.
    Admin,
    /// Regular member who can be attached to bookings.
    Customer,
}

impl Role {
    /// Returns the storage string for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Customer => "customer",
        }
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "customer" => Ok(Self::Customer),
            _ => Err(AppError::Validation(format!("unknown role '{value}'"))),
        }
    }
}

/// Number of consecutive failures after which an account is locked.
pub const MAX_FAILED_LOGINS: i32 = 3;

/// Duration of a lock once tripped.
pub const LOCKOUT_SECONDS: i64 = 60;

/// Per-account login throttle state.
///
/// A lock expires lazily: `locked_until` in the past counts as open, and the
/// next attempt (success or failure) overwrites it. No unlock job exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutState {
    /// Consecutive failed login attempts.
    pub failed_attempts: i32,
    /// Account rejects all attempts until this time, if set.
    pub locked_until: Option<DateTime<Utc>>,
}

impl LockoutState {
    /// State of a freshly created account.
    #[must_use]
    pub fn clear() -> Self {
        Self {
            failed_attempts: 0,
            locked_until: None,
        }
    }

    /// Whether the account currently rejects all attempts.
    #[must_use]
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.locked_until.is_some_and(|until| now < until)
    }

    /// Seconds until the lock expires, rounded up. Zero when not locked.
    #[must_use]
    pub fn remaining_lock_seconds(&self, now: DateTime<Utc>) -> i64 {
        let Some(until) = self.locked_until else {
            return 0;
        };

        let millis = (until - now).num_milliseconds();
        if millis <= 0 {
            return 0;
        }

        // Ceiling division; millis is positive here.
        (millis + 999) / 1000
    }

    /// Failed attempts still allowed before the lock trips.
    #[must_use]
    pub fn remaining_attempts(&self) -> i32 {
        (MAX_FAILED_LOGINS - self.failed_attempts).max(0)
    }

    /// Whether a successful login must write a counter reset.
    #[must_use]
    pub fn needs_reset(&self) -> bool {
        self.failed_attempts > 0 || self.locked_until.is_some()
    }
}

/// Validates an email address structurally: exactly one `@`, non-empty local
/// part, domain with at least one `.`, at most 254 characters.
pub fn validate_email(value: &str) -> AppResult<String> {
    let trimmed = value.trim().to_lowercase();

    if trimmed.is_empty() {
        return Err(AppError::Validation(
            "email address must not be empty".to_owned(),
        ));
    }

    let Some((local, domain)) = trimmed.split_once('@') else {
        return Err(AppError::Validation(
            "email address must contain exactly one '@'".to_owned(),
        ));
    };

    if local.is_empty() || domain.contains('@') {
        return Err(AppError::Validation(
            "email address must contain exactly one '@'".to_owned(),
        ));
    }

    if domain.is_empty() || !domain.contains('.') {
        return Err(AppError::Validation(
            "email domain must contain at least one '.'".to_owned(),
        ));
    }

    if trimmed.len() > 254 {
        return Err(AppError::Validation(
            "email address must not exceed 254 characters".to_owned(),
        ));
    }

    Ok(trimmed)
}
