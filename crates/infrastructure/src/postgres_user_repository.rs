//! PostgreSQL-backed user repository.
//!
//! Implements both the account port used by the login throttle guard and the
//! administration port, against the same `users` table.

use async_trait::async_trait;
use sqlx::PgPool;

use pitchdesk_application::{
    AccountRecord, AccountRepository, NewUser, UserRepository, UserSummary,
};
use pitchdesk_core::{AppError, AppResult};
use pitchdesk_domain::{LOCKOUT_SECONDS, LockoutState, MAX_FAILED_LOGINS, Role, UserId};

/// PostgreSQL implementation of the account and user repository ports.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: uuid::Uuid,
    username: String,
    name: String,
    role: String,
    password_hash: String,
    failed_login_count: i32,
    locked_until: Option<chrono::DateTime<chrono::Utc>>,
}

impl TryFrom<AccountRow> for AccountRecord {
    type Error = AppError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::from_uuid(row.id),
            username: row.username,
            name: row.name,
            role: row.role.parse::<Role>()?,
            password_hash: row.password_hash,
            lockout: LockoutState {
                failed_attempts: row.failed_login_count,
                locked_until: row.locked_until,
            },
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: uuid::Uuid,
    name: String,
    email: String,
    username: String,
    role: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<UserRow> for UserSummary {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            username: row.username,
            role: row.role.parse::<Role>()?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LockoutRow {
    failed_login_count: i32,
    locked_until: Option<chrono::DateTime<chrono::Utc>>,
}

#[async_trait]
impl AccountRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<AccountRecord>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, username, name, role, password_hash, failed_login_count, locked_until
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find account: {error}")))?;

        row.map(AccountRecord::try_from).transpose()
    }

    async fn record_failed_login(&self, user_id: UserId) -> AppResult<LockoutState> {
        // One atomic conditional update: increment and set the lock timestamp
        // when the new count reaches the threshold. Concurrent attempts
        // serialize on the row instead of losing updates.
        let row = sqlx::query_as::<_, LockoutRow>(
            r#"
            UPDATE users
            SET failed_login_count = failed_login_count + 1,
                locked_until = CASE
                    WHEN failed_login_count + 1 >= $2
                        THEN now() + make_interval(secs => $3::float8)
                    ELSE locked_until
                END
            WHERE id = $1
            RETURNING failed_login_count, locked_until
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(MAX_FAILED_LOGINS)
        .bind(LOCKOUT_SECONDS as f64)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to record failed login: {error}")))?
        .ok_or_else(|| AppError::NotFound("account not found".to_owned()))?;

        Ok(LockoutState {
            failed_attempts: row.failed_login_count,
            locked_until: row.locked_until,
        })
    }

    async fn reset_lockout(&self, user_id: UserId) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET failed_login_count = 0, locked_until = NULL
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to reset lockout: {error}")))?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn list_all(&self) -> AppResult<Vec<UserSummary>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, username, role, created_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list users: {error}")))?;

        rows.into_iter().map(UserSummary::try_from).collect()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserSummary>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, username, role, created_at
            FROM users
            WHERE email = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find user by email: {error}")))?;

        row.map(UserSummary::try_from).transpose()
    }

    async fn create(&self, user: &NewUser) -> AppResult<UserSummary> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, email, username, password_hash, role)
            VALUES ($1, LOWER($2), $3, $4, $5)
            RETURNING id, name, email, username, role, created_at
            "#,
        )
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(user.username.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| unique_conflict_or_internal(error, "create user"))?;

        UserSummary::try_from(row)
    }

    async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to count users: {error}")))
    }
}

fn unique_conflict_or_internal(error: sqlx::Error, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict(
            "an account with this email or username already exists".to_owned(),
        );
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}
