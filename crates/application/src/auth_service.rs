//! Login throttle guard: ports and application service.
//!
//! Decides the outcome of one login attempt against the per-account failure
//! counter and lock timestamp. All counter mutations happen through single
//! atomic repository calls so that concurrent attempts never lose updates.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use pitchdesk_core::AppResult;
use pitchdesk_domain::{LOCKOUT_SECONDS, LockoutState, Role, UserId};

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Account record returned by repository queries.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Display name shown in the back office.
    pub name: String,
    /// Role assigned to the account.
    pub role: Role,
    /// Argon2id password hash.
    pub password_hash: String,
    /// Current login throttle state.
    pub lockout: LockoutState,
}

/// Repository port for account persistence.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Finds an account by username (case-sensitive, unique).
    async fn find_by_username(&self, username: &str) -> AppResult<Option<AccountRecord>>;

    /// Records one failed login attempt.
    ///
    /// Increments the failure counter and sets the lock timestamp when the
    /// new count reaches the threshold, as one atomic conditional update at
    /// the store. Returns the post-update state; callers must never
    /// read-increment-write in separate steps.
    async fn record_failed_login(&self, user_id: UserId) -> AppResult<LockoutState>;

    /// Atomically resets the failure counter and removes any account lock.
    async fn reset_lockout(&self, user_id: UserId) -> AppResult<()>;
}

/// Port for password hashing operations. Keeps domain/application free of
/// direct cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password using Argon2id.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    /// Must run in constant time regardless of validity.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

// ---------------------------------------------------------------------------
// Login outcome
// ---------------------------------------------------------------------------

/// Result of a login attempt.
///
/// Credential rejections are modeled as outcomes, not errors; only
/// infrastructure failures surface through the `Err` channel.
#[derive(Debug)]
pub enum LoginOutcome {
    /// Authentication succeeded. Session can be established.
    Accepted(AccountRecord),
    /// Password was wrong; the account stays open.
    WrongPassword {
        /// Failed attempts still allowed before the lock trips.
        remaining_attempts: i32,
    },
    /// This failure tripped the lock.
    LockTripped {
        /// Duration of the freshly applied lock.
        lock_seconds: i64,
    },
    /// The account was already locked; nothing was checked or written.
    Locked {
        /// Seconds until the lock expires, rounded up.
        remaining_seconds: i64,
    },
    /// No account exists for the username. Indistinguishable from a wrong
    /// password at the HTTP layer.
    UnknownUser,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for admin authentication with brute-force lockout.
#[derive(Clone)]
pub struct AuthService {
    account_repository: Arc<dyn AccountRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl AuthService {
    /// Creates a new authentication service.
    #[must_use]
    pub fn new(
        account_repository: Arc<dyn AccountRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            account_repository,
            password_hasher,
        }
    }

    /// Evaluates one login attempt and mutates lockout state accordingly.
    ///
    /// Locked accounts are rejected at the door: the password is not checked
    /// and nothing is written. A lock timestamp in the past counts as open;
    /// the next attempt overwrites it without a separate unlock step.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginOutcome> {
        let account = self.account_repository.find_by_username(username).await?;

        let Some(account) = account else {
            // OWASP: hash anyway so unknown usernames cost the same as wrong
            // passwords.
            let _ = self.password_hasher.hash_password(password);
            return Ok(LoginOutcome::UnknownUser);
        };

        let now = Utc::now();
        if account.lockout.is_locked(now) {
            return Ok(LoginOutcome::Locked {
                remaining_seconds: account.lockout.remaining_lock_seconds(now),
            });
        }

        let password_valid = self
            .password_hasher
            .verify_password(password, &account.password_hash)?;

        if !password_valid {
            let updated = self
                .account_repository
                .record_failed_login(account.id)
                .await?;

            if updated.locked_until.is_some() {
                return Ok(LoginOutcome::LockTripped {
                    lock_seconds: LOCKOUT_SECONDS,
                });
            }

            return Ok(LoginOutcome::WrongPassword {
                remaining_attempts: updated.remaining_attempts(),
            });
        }

        // Password correct -- clear dirty counters in the same request.
        if account.lockout.needs_reset() {
            self.account_repository.reset_lockout(account.id).await?;
        }

        Ok(LoginOutcome::Accepted(account))
    }
}
