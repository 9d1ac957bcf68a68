//! Booking ports and application service.
//!
//! Owns reservation lifecycle operations: availability checks, creation with
//! conflict detection, status changes, deletion, and the monthly revenue
//! report. The application-level availability check is an early exit only;
//! the store enforces the no-overlap invariant transactionally and surfaces
//! violations as conflicts.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use pitchdesk_core::{AppError, AppResult};
use pitchdesk_domain::{
    BookingId, BookingPayer, BookingStatus, FieldId, TimeSlot, booking_slot,
};

use crate::FieldRepository;

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Booking record returned by repository queries.
#[derive(Debug, Clone)]
pub struct BookingRecord {
    /// Unique booking identifier.
    pub id: BookingId,
    /// The reserved field.
    pub field_id: FieldId,
    /// Member or guest paying for the slot.
    pub payer: BookingPayer,
    /// Half-open reserved time range.
    pub slot: TimeSlot,
    /// Total price in the smallest currency unit.
    pub total_price: i64,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Booking row enriched with display names for admin tables.
#[derive(Debug, Clone)]
pub struct BookingSummary {
    /// Unique booking identifier.
    pub id: BookingId,
    /// Name of the reserved field.
    pub field_name: String,
    /// Member display name or guest name.
    pub payer_name: String,
    /// Half-open reserved time range.
    pub slot: TimeSlot,
    /// Total price in the smallest currency unit.
    pub total_price: i64,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a booking.
#[derive(Debug, Clone)]
pub struct NewBooking {
    /// The field to reserve.
    pub field_id: FieldId,
    /// Member or guest paying for the slot.
    pub payer: BookingPayer,
    /// Half-open time range to reserve.
    pub slot: TimeSlot,
    /// Total price in the smallest currency unit.
    pub total_price: i64,
    /// Initial lifecycle status.
    pub status: BookingStatus,
}

/// Repository port for booking persistence.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Returns one non-cancelled booking on the field whose slot overlaps the
    /// candidate, if any exists. Read-only.
    async fn find_conflict(
        &self,
        field_id: FieldId,
        slot: &TimeSlot,
    ) -> AppResult<Option<BookingRecord>>;

    /// Inserts a booking in a single transaction.
    ///
    /// The store must enforce the no-overlap invariant for non-cancelled rows
    /// (exclusion constraint); a violation surfaces as `AppError::Conflict`.
    async fn insert(&self, booking: &NewBooking) -> AppResult<BookingRecord>;

    /// Lists all bookings, newest first.
    async fn list_all(&self) -> AppResult<Vec<BookingSummary>>;

    /// Updates the status of a booking.
    async fn update_status(&self, id: BookingId, status: BookingStatus)
    -> AppResult<BookingSummary>;

    /// Deletes a booking.
    async fn delete(&self, id: BookingId) -> AppResult<()>;

    /// Lists confirmed bookings starting within `[start, end)`, ascending.
    async fn confirmed_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<BookingSummary>>;

    /// Total revenue over confirmed bookings.
    async fn confirmed_revenue(&self) -> AppResult<i64>;

    /// Total number of bookings regardless of status.
    async fn count(&self) -> AppResult<i64>;

    /// The most recently created bookings.
    async fn recent(&self, limit: i64) -> AppResult<Vec<BookingSummary>>;
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Parameters for creating a booking.
#[derive(Debug, Clone)]
pub struct CreateBookingParams {
    /// The field to reserve.
    pub field_id: FieldId,
    /// Calendar date of the booking.
    pub date: NaiveDate,
    /// Whole start hour within operating hours.
    pub start_hour: u32,
    /// Duration in whole hours.
    pub duration_hours: u32,
    /// Member or guest paying for the slot.
    pub payer: BookingPayer,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for reservations.
#[derive(Clone)]
pub struct BookingService {
    booking_repository: Arc<dyn BookingRepository>,
    field_repository: Arc<dyn FieldRepository>,
}

impl BookingService {
    /// Creates a new booking service.
    #[must_use]
    pub fn new(
        booking_repository: Arc<dyn BookingRepository>,
        field_repository: Arc<dyn FieldRepository>,
    ) -> Self {
        Self {
            booking_repository,
            field_repository,
        }
    }

    /// Pure availability check: true when no non-cancelled booking on the
    /// field overlaps the slot. Touching endpoints do not conflict.
    pub async fn is_slot_available(&self, field_id: FieldId, slot: &TimeSlot) -> AppResult<bool> {
        let conflict = self.booking_repository.find_conflict(field_id, slot).await?;
        Ok(conflict.is_none())
    }

    /// Creates a booking after validating date, operating hours, field
    /// existence, and availability. The booking is auto-promoted to confirmed
    /// and priced at `duration × hourly rate`.
    pub async fn create_booking(&self, params: CreateBookingParams) -> AppResult<BookingRecord> {
        if params.date < Utc::now().date_naive() {
            return Err(AppError::Validation(
                "cannot create a booking for a past date".to_owned(),
            ));
        }

        let slot = booking_slot(params.date, params.start_hour, params.duration_hours)?;

        let field = self
            .field_repository
            .find_by_id(params.field_id)
            .await?
            .ok_or_else(|| AppError::NotFound("field not found".to_owned()))?;

        if !self.is_slot_available(params.field_id, &slot).await? {
            return Err(AppError::Conflict(
                "that time slot is already taken, please choose another time".to_owned(),
            ));
        }

        let total_price = i64::from(params.duration_hours) * field.price_per_hour;

        // Single insert; a concurrent overlapping request still fails on the
        // store-level exclusion constraint.
        self.booking_repository
            .insert(&NewBooking {
                field_id: params.field_id,
                payer: params.payer,
                slot,
                total_price,
                status: BookingStatus::Confirmed,
            })
            .await
    }

    /// Lists all bookings, newest first.
    pub async fn list_bookings(&self) -> AppResult<Vec<BookingSummary>> {
        self.booking_repository.list_all().await
    }

    /// Changes the status of a booking.
    pub async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> AppResult<BookingSummary> {
        self.booking_repository.update_status(id, status).await
    }

    /// Deletes a booking.
    pub async fn delete_booking(&self, id: BookingId) -> AppResult<()> {
        self.booking_repository.delete(id).await
    }

    /// Confirmed bookings whose start time falls within the given month,
    /// ascending by start time.
    pub async fn monthly_report(&self, year: i32, month: u32) -> AppResult<Vec<BookingSummary>> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| AppError::Validation(format!("invalid report month {year}-{month}")))?;

        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let end = NaiveDate::from_ymd_opt(next_year, next_month, 1).ok_or_else(|| {
            AppError::Validation(format!("invalid report month {year}-{month}"))
        })?;

        let start = start
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| AppError::Internal("invalid month start".to_owned()))?
            .and_utc();
        let end = end
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| AppError::Internal("invalid month end".to_owned()))?
            .and_utc();

        self.booking_repository.confirmed_between(start, end).await
    }
}

#[cfg(test)]
mod tests;
