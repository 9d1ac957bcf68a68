//! User administration ports and application service.
//!
//! Back-office CRUD for user accounts. Password hashes never leave the
//! repository boundary: listing and creation return summaries only.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use pitchdesk_core::{AppError, AppResult, NonEmptyString};
use pitchdesk_domain::{Role, UserId, validate_email};

use crate::PasswordHasher;

/// Minimum accepted password length for new accounts.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// User row without credential or lockout columns.
#[derive(Debug, Clone)]
pub struct UserSummary {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Canonical email address.
    pub email: String,
    /// Unique login name.
    pub username: String,
    /// Role assigned to the account.
    pub role: Role,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Canonical email address.
    pub email: String,
    /// Unique login name.
    pub username: String,
    /// Argon2id password hash.
    pub password_hash: String,
    /// Role assigned to the account.
    pub role: Role,
}

/// Repository port for user administration.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lists all users, newest first, without password hashes.
    async fn list_all(&self) -> AppResult<Vec<UserSummary>>;

    /// Finds a user by canonical email address.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserSummary>>;

    /// Creates a new user record. Duplicate email or username surfaces as
    /// `AppError::Conflict`.
    async fn create(&self, user: &NewUser) -> AppResult<UserSummary>;

    /// Total number of users.
    async fn count(&self) -> AppResult<i64>;
}

/// Parameters for creating a user.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    /// Display name.
    pub name: String,
    /// Email address, validated and lowercased before storage.
    pub email: String,
    /// Unique login name.
    pub username: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// Role for the new account; defaults to customer.
    pub role: Option<Role>,
}

/// Application service for user administration.
#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }

    /// Lists all users without credential data.
    pub async fn list_users(&self) -> AppResult<Vec<UserSummary>> {
        self.user_repository.list_all().await
    }

    /// Creates a user after validating inputs and hashing the password.
    pub async fn create_user(&self, params: CreateUserParams) -> AppResult<UserSummary> {
        let name = NonEmptyString::new(params.name)?;
        let username = NonEmptyString::new(params.username)?;
        let email = validate_email(&params.email)?;

        if params.password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(AppError::Validation(format!(
                "password must be at least {PASSWORD_MIN_LENGTH} characters"
            )));
        }

        let existing = self.user_repository.find_by_email(&email).await?;
        if existing.is_some() {
            return Err(AppError::Conflict(
                "email is already used by another user".to_owned(),
            ));
        }

        let password_hash = self.password_hasher.hash_password(&params.password)?;

        self.user_repository
            .create(&NewUser {
                name: name.into(),
                email,
                username: username.into(),
                password_hash,
                role: params.role.unwrap_or(Role::Customer),
            })
            .await
    }
}
