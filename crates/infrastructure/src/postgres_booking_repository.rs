//! PostgreSQL-backed booking repository.
//!
//! The schema carries a gist exclusion constraint over
//! `(field_id, tstzrange(start_time, end_time))` for non-cancelled rows, so
//! two overlapping inserts can never both commit even under concurrency. An
//! exclusion violation is reported here as a conflict.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use pitchdesk_application::{BookingRecord, BookingRepository, BookingSummary, NewBooking};
use pitchdesk_core::{AppError, AppResult, NonEmptyString};
use pitchdesk_domain::{BookingId, BookingPayer, BookingStatus, FieldId, TimeSlot, UserId};

/// SQLSTATE for exclusion constraint violations.
const EXCLUSION_VIOLATION: &str = "23P01";

/// PostgreSQL implementation of the booking repository port.
#[derive(Clone)]
pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    field_id: Uuid,
    user_id: Option<Uuid>,
    guest_name: Option<String>,
    guest_phone: Option<String>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    total_price: i64,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for BookingRecord {
    type Error = AppError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let payer = payer_from_columns(row.user_id, row.guest_name, row.guest_phone)?;

        Ok(Self {
            id: BookingId::from_uuid(row.id),
            field_id: FieldId::from_uuid(row.field_id),
            payer,
            slot: TimeSlot::new(row.start_time, row.end_time)
                .map_err(|error| AppError::Internal(format!("invalid stored slot: {error}")))?,
            total_price: row.total_price,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BookingSummaryRow {
    id: Uuid,
    field_name: String,
    payer_name: String,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    total_price: i64,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookingSummaryRow> for BookingSummary {
    type Error = AppError;

    fn try_from(row: BookingSummaryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BookingId::from_uuid(row.id),
            field_name: row.field_name,
            payer_name: row.payer_name,
            slot: TimeSlot::new(row.start_time, row.end_time)
                .map_err(|error| AppError::Internal(format!("invalid stored slot: {error}")))?,
            total_price: row.total_price,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

/// Rebuilds a payer from its storage columns. The schema guarantees one of
/// `user_id` or `guest_name` is present.
fn payer_from_columns(
    user_id: Option<Uuid>,
    guest_name: Option<String>,
    guest_phone: Option<String>,
) -> AppResult<BookingPayer> {
    if let Some(user_id) = user_id {
        return Ok(BookingPayer::Member {
            user_id: UserId::from_uuid(user_id),
        });
    }

    let name = guest_name
        .ok_or_else(|| AppError::Internal("booking row has neither user nor guest".to_owned()))?;
    Ok(BookingPayer::Guest {
        name: NonEmptyString::new(name)
            .map_err(|error| AppError::Internal(format!("invalid stored guest name: {error}")))?,
        phone: guest_phone,
    })
}

/// Splits a payer into its three storage columns.
fn payer_columns(payer: &BookingPayer) -> (Option<Uuid>, Option<&str>, Option<&str>) {
    match payer {
        BookingPayer::Member { user_id } => (Some(user_id.as_uuid()), None, None),
        BookingPayer::Guest { name, phone } => (None, Some(name.as_str()), phone.as_deref()),
    }
}

fn summaries(rows: Vec<BookingSummaryRow>) -> AppResult<Vec<BookingSummary>> {
    rows.into_iter().map(BookingSummary::try_from).collect()
}

const SUMMARY_SELECT: &str = r#"
    SELECT b.id,
           f.name AS field_name,
           COALESCE(u.name, b.guest_name, '') AS payer_name,
           b.start_time,
           b.end_time,
           b.total_price,
           b.status,
           b.created_at
    FROM bookings b
    JOIN fields f ON f.id = b.field_id
    LEFT JOIN users u ON u.id = b.user_id
"#;

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn find_conflict(
        &self,
        field_id: FieldId,
        slot: &TimeSlot,
    ) -> AppResult<Option<BookingRecord>> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, field_id, user_id, guest_name, guest_phone,
                   start_time, end_time, total_price, status, created_at
            FROM bookings
            WHERE field_id = $1
              AND status <> 'cancelled'
              AND start_time < $3
              AND end_time > $2
            LIMIT 1
            "#,
        )
        .bind(field_id.as_uuid())
        .bind(slot.start())
        .bind(slot.end())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to check booking availability: {error}"))
        })?;

        row.map(BookingRecord::try_from).transpose()
    }

    async fn insert(&self, booking: &NewBooking) -> AppResult<BookingRecord> {
        let (user_id, guest_name, guest_phone) = payer_columns(&booking.payer);

        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            INSERT INTO bookings
                (field_id, user_id, guest_name, guest_phone,
                 start_time, end_time, total_price, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, field_id, user_id, guest_name, guest_phone,
                      start_time, end_time, total_price, status, created_at
            "#,
        )
        .bind(booking.field_id.as_uuid())
        .bind(user_id)
        .bind(guest_name)
        .bind(guest_phone)
        .bind(booking.slot.start())
        .bind(booking.slot.end())
        .bind(booking.total_price)
        .bind(booking.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(overlap_conflict_or_internal)?;

        BookingRecord::try_from(row)
    }

    async fn list_all(&self) -> AppResult<Vec<BookingSummary>> {
        let rows = sqlx::query_as::<_, BookingSummaryRow>(&format!(
            "{SUMMARY_SELECT} ORDER BY b.created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list bookings: {error}")))?;

        summaries(rows)
    }

    async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> AppResult<BookingSummary> {
        let updated: Option<Uuid> =
            sqlx::query_scalar("UPDATE bookings SET status = $2 WHERE id = $1 RETURNING id")
                .bind(id.as_uuid())
                .bind(status.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|error| {
                    AppError::Internal(format!("failed to update booking status: {error}"))
                })?;

        if updated.is_none() {
            return Err(AppError::NotFound("booking not found".to_owned()));
        }

        let row = sqlx::query_as::<_, BookingSummaryRow>(&format!(
            "{SUMMARY_SELECT} WHERE b.id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load booking: {error}")))?;

        BookingSummary::try_from(row)
    }

    async fn delete(&self, id: BookingId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete booking: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("booking not found".to_owned()));
        }

        Ok(())
    }

    async fn confirmed_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<BookingSummary>> {
        let rows = sqlx::query_as::<_, BookingSummaryRow>(&format!(
            r#"
            {SUMMARY_SELECT}
            WHERE b.status = 'confirmed'
              AND b.start_time >= $1
              AND b.start_time < $2
            ORDER BY b.start_time ASC
            "#
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load report rows: {error}")))?;

        summaries(rows)
    }

    async fn confirmed_revenue(&self) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(total_price), 0) FROM bookings WHERE status = 'confirmed'",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to compute revenue: {error}")))
    }

    async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to count bookings: {error}")))
    }

    async fn recent(&self, limit: i64) -> AppResult<Vec<BookingSummary>> {
        let rows = sqlx::query_as::<_, BookingSummaryRow>(&format!(
            "{SUMMARY_SELECT} ORDER BY b.created_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load recent bookings: {error}")))?;

        summaries(rows)
    }
}

/// Maps an exclusion constraint violation to a slot conflict; everything
/// else is an infrastructure failure.
fn overlap_conflict_or_internal(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(database_error) = &error
        && database_error.code().as_deref() == Some(EXCLUSION_VIOLATION)
    {
        return AppError::Conflict(
            "that time slot is already taken, please choose another time".to_owned(),
        );
    }

    AppError::Internal(format!("failed to create booking: {error}"))
}
