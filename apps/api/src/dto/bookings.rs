use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pitchdesk_application::{BookingRecord, BookingSummary, CreateBookingParams};
use pitchdesk_core::{AppError, AppResult, NonEmptyString};
use pitchdesk_domain::{BookingPayer, BookingStatus, FieldId, UserId};

/// Payload for creating a booking.
///
/// Either `user_id` (a registered member) or `guest_name` must be present;
/// `user_id` wins when both are given.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub field_id: Uuid,
    pub date: NaiveDate,
    pub start_hour: u32,
    pub duration_hours: u32,
    pub user_id: Option<Uuid>,
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
}

impl CreateBookingRequest {
    /// Validates the payload into service parameters.
    pub fn into_params(self) -> AppResult<CreateBookingParams> {
        let payer = match (self.user_id, self.guest_name) {
            (Some(user_id), _) => BookingPayer::Member {
                user_id: UserId::from_uuid(user_id),
            },
            (None, Some(name)) => BookingPayer::Guest {
                name: NonEmptyString::new(name)?,
                phone: self.guest_phone.filter(|phone| !phone.trim().is_empty()),
            },
            (None, None) => {
                return Err(AppError::Validation(
                    "a booking needs either a user id or a guest name".to_owned(),
                ));
            }
        };

        Ok(CreateBookingParams {
            field_id: FieldId::from_uuid(self.field_id),
            date: self.date,
            start_hour: self.start_hour,
            duration_hours: self.duration_hours,
            payer,
        })
    }
}

/// Payload for a booking status change.
///
/// The status is kept as a raw string so unknown values map to a validation
/// error instead of a body rejection.
#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: String,
}

impl UpdateBookingStatusRequest {
    /// Parses the requested status against the allowed set.
    pub fn status(&self) -> AppResult<BookingStatus> {
        self.status.parse()
    }
}

/// API representation of a freshly created booking.
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub field_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_price: i64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl From<BookingRecord> for BookingResponse {
    fn from(record: BookingRecord) -> Self {
        Self {
            id: record.id.as_uuid(),
            field_id: record.field_id.as_uuid(),
            start_time: record.slot.start(),
            end_time: record.slot.end(),
            total_price: record.total_price,
            status: record.status,
            created_at: record.created_at,
        }
    }
}

/// API representation of a booking row in admin tables and reports.
#[derive(Debug, Serialize)]
pub struct BookingSummaryResponse {
    pub id: Uuid,
    pub field_name: String,
    pub customer_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_price: i64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl From<BookingSummary> for BookingSummaryResponse {
    fn from(summary: BookingSummary) -> Self {
        Self {
            id: summary.id.as_uuid(),
            field_name: summary.field_name,
            customer_name: summary.payer_name,
            start_time: summary.slot.start(),
            end_time: summary.slot.end(),
            total_price: summary.total_price,
            status: summary.status,
            created_at: summary.created_at,
        }
    }
}
