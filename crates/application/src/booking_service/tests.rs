#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};

use pitchdesk_core::{AppError, AppResult, NonEmptyString};
use pitchdesk_domain::{
    BookingId, BookingPayer, BookingStatus, FieldDefinition, FieldId, TimeSlot, UserId,
};

use super::{
    BookingRecord, BookingRepository, BookingService, BookingSummary, CreateBookingParams,
    NewBooking,
};
use crate::{FieldRecord, FieldRepository};

#[derive(Default)]
struct TestBookings {
    rows: Mutex<Vec<BookingRecord>>,
}

impl TestBookings {
    fn seed(&self, record: BookingRecord) {
        if let Ok(mut rows) = self.rows.lock() {
            rows.push(record);
        }
    }

    fn len(&self) -> usize {
        self.rows.lock().map(|rows| rows.len()).unwrap_or(0)
    }
}

fn summary_of(record: &BookingRecord) -> BookingSummary {
    let payer_name = match &record.payer {
        BookingPayer::Member { user_id } => user_id.to_string(),
        BookingPayer::Guest { name, .. } => name.as_str().to_owned(),
    };

    BookingSummary {
        id: record.id,
        field_name: "Field".to_owned(),
        payer_name,
        slot: record.slot,
        total_price: record.total_price,
        status: record.status,
        created_at: record.created_at,
    }
}

#[async_trait]
impl BookingRepository for TestBookings {
    async fn find_conflict(
        &self,
        field_id: FieldId,
        slot: &TimeSlot,
    ) -> AppResult<Option<BookingRecord>> {
        let rows = self
            .rows
            .lock()
            .map_err(|error| AppError::Internal(format!("failed to lock repo state: {error}")))?;

        Ok(rows
            .iter()
            .find(|row| {
                row.field_id == field_id
                    && row.status != BookingStatus::Cancelled
                    && row.slot.overlaps(slot)
            })
            .cloned())
    }

    async fn insert(&self, booking: &NewBooking) -> AppResult<BookingRecord> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|error| AppError::Internal(format!("failed to lock repo state: {error}")))?;

        // Mirrors the store-level exclusion constraint.
        let conflicting = rows.iter().any(|row| {
            row.field_id == booking.field_id
                && row.status != BookingStatus::Cancelled
                && row.slot.overlaps(&booking.slot)
        });
        if conflicting {
            return Err(AppError::Conflict("overlapping booking".to_owned()));
        }

        let record = BookingRecord {
            id: BookingId::new(),
            field_id: booking.field_id,
            payer: booking.payer.clone(),
            slot: booking.slot,
            total_price: booking.total_price,
            status: booking.status,
            created_at: Utc::now(),
        };
        rows.push(record.clone());

        Ok(record)
    }

    async fn list_all(&self) -> AppResult<Vec<BookingSummary>> {
        let rows = self
            .rows
            .lock()
            .map_err(|error| AppError::Internal(format!("failed to lock repo state: {error}")))?;
        Ok(rows.iter().map(summary_of).collect())
    }

    async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> AppResult<BookingSummary> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|error| AppError::Internal(format!("failed to lock repo state: {error}")))?;

        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| AppError::NotFound("booking not found".to_owned()))?;
        row.status = status;

        Ok(summary_of(row))
    }

    async fn delete(&self, id: BookingId) -> AppResult<()> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|error| AppError::Internal(format!("failed to lock repo state: {error}")))?;

        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound("booking not found".to_owned()));
        }

        Ok(())
    }

    async fn confirmed_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<BookingSummary>> {
        let rows = self
            .rows
            .lock()
            .map_err(|error| AppError::Internal(format!("failed to lock repo state: {error}")))?;

        let mut matching: Vec<_> = rows
            .iter()
            .filter(|row| {
                row.status == BookingStatus::Confirmed
                    && row.slot.start() >= start
                    && row.slot.start() < end
            })
            .map(summary_of)
            .collect();
        matching.sort_by_key(|summary| summary.slot.start());

        Ok(matching)
    }

    async fn confirmed_revenue(&self) -> AppResult<i64> {
        let rows = self
            .rows
            .lock()
            .map_err(|error| AppError::Internal(format!("failed to lock repo state: {error}")))?;
        Ok(rows
            .iter()
            .filter(|row| row.status == BookingStatus::Confirmed)
            .map(|row| row.total_price)
            .sum())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.len() as i64)
    }

    async fn recent(&self, limit: i64) -> AppResult<Vec<BookingSummary>> {
        let rows = self
            .rows
            .lock()
            .map_err(|error| AppError::Internal(format!("failed to lock repo state: {error}")))?;
        Ok(rows.iter().rev().take(limit as usize).map(summary_of).collect())
    }
}

struct TestFields {
    rows: Vec<FieldRecord>,
}

impl TestFields {
    fn with_field(field: FieldRecord) -> Arc<Self> {
        Arc::new(Self { rows: vec![field] })
    }
}

#[async_trait]
impl FieldRepository for TestFields {
    async fn list_all(&self) -> AppResult<Vec<FieldRecord>> {
        Ok(self.rows.clone())
    }

    async fn find_by_id(&self, field_id: FieldId) -> AppResult<Option<FieldRecord>> {
        Ok(self.rows.iter().find(|row| row.id == field_id).cloned())
    }

    async fn create(&self, _definition: &FieldDefinition) -> AppResult<FieldRecord> {
        Err(AppError::Internal("not used in these tests".to_owned()))
    }

    async fn delete(&self, _field_id: FieldId) -> AppResult<()> {
        Err(AppError::Internal("not used in these tests".to_owned()))
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.rows.len() as i64)
    }
}

fn field(price_per_hour: i64) -> FieldRecord {
    FieldRecord {
        id: FieldId::new(),
        name: "Field A".to_owned(),
        field_type: "synthetic".to_owned(),
        price_per_hour,
        created_at: Utc::now(),
    }
}

fn guest() -> BookingPayer {
    BookingPayer::Guest {
        name: NonEmptyString::new("Budi").unwrap(),
        phone: Some("0812000111".to_owned()),
    }
}

fn future_date() -> NaiveDate {
    Utc::now().date_naive() + Duration::days(30)
}

fn params(field_id: FieldId, start_hour: u32, duration_hours: u32) -> CreateBookingParams {
    CreateBookingParams {
        field_id,
        date: future_date(),
        start_hour,
        duration_hours,
        payer: guest(),
    }
}

fn service(
    bookings: Arc<TestBookings>,
    fields: Arc<TestFields>,
) -> BookingService {
    BookingService::new(bookings, fields)
}

#[tokio::test]
async fn adjacent_bookings_are_both_accepted() {
    let field = field(150_000);
    let field_id = field.id;
    let bookings = Arc::new(TestBookings::default());
    let service = service(bookings.clone(), TestFields::with_field(field));

    let first = service.create_booking(params(field_id, 10, 1)).await;
    assert!(first.is_ok());

    // 11:00-12:00 touches 10:00-11:00 but does not overlap.
    let second = service.create_booking(params(field_id, 11, 1)).await;
    assert!(second.is_ok());
    assert_eq!(bookings.len(), 2);
}

#[tokio::test]
async fn overlapping_booking_is_rejected_with_conflict() {
    let field = field(150_000);
    let field_id = field.id;
    let bookings = Arc::new(TestBookings::default());
    let service = service(bookings.clone(), TestFields::with_field(field));

    let first = service.create_booking(params(field_id, 10, 2)).await;
    assert!(first.is_ok());

    let second = service.create_booking(params(field_id, 11, 2)).await;
    assert!(matches!(second, Err(AppError::Conflict(_))));
    assert_eq!(bookings.len(), 1);
}

#[tokio::test]
async fn cancelled_booking_does_not_block_the_slot() {
    let field = field(150_000);
    let field_id = field.id;
    let bookings = Arc::new(TestBookings::default());
    let service = service(bookings.clone(), TestFields::with_field(field));

    let cancelled = service
        .create_booking(params(field_id, 10, 1))
        .await
        .unwrap();
    service
        .update_status(cancelled.id, BookingStatus::Cancelled)
        .await
        .unwrap();

    // The identical slot is available again.
    let replacement = service.create_booking(params(field_id, 10, 1)).await;
    assert!(replacement.is_ok());
}

#[tokio::test]
async fn same_slot_on_another_field_is_accepted() {
    let field_a = field(150_000);
    let field_b = field(100_000);
    let bookings = Arc::new(TestBookings::default());
    let fields = Arc::new(TestFields {
        rows: vec![field_a.clone(), field_b.clone()],
    });
    let service = BookingService::new(bookings.clone(), fields);

    assert!(service.create_booking(params(field_a.id, 10, 1)).await.is_ok());
    assert!(service.create_booking(params(field_b.id, 10, 1)).await.is_ok());
}

#[tokio::test]
async fn past_date_is_rejected() {
    let field = field(150_000);
    let field_id = field.id;
    let service = service(
        Arc::new(TestBookings::default()),
        TestFields::with_field(field),
    );

    let mut request = params(field_id, 10, 1);
    request.date = Utc::now().date_naive() - Duration::days(1);

    let result = service.create_booking(request).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn slot_outside_operating_hours_is_rejected() {
    let field = field(150_000);
    let field_id = field.id;
    let service = service(
        Arc::new(TestBookings::default()),
        TestFields::with_field(field),
    );

    let early = service.create_booking(params(field_id, 6, 1)).await;
    assert!(matches!(early, Err(AppError::Validation(_))));

    let late = service.create_booking(params(field_id, 21, 3)).await;
    assert!(matches!(late, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn unknown_field_is_not_found() {
    let service = service(
        Arc::new(TestBookings::default()),
        TestFields::with_field(field(150_000)),
    );

    let result = service.create_booking(params(FieldId::new(), 10, 1)).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn price_is_duration_times_hourly_rate_and_auto_confirmed() {
    let field = field(150_000);
    let field_id = field.id;
    let service = service(
        Arc::new(TestBookings::default()),
        TestFields::with_field(field),
    );

    let booking = service
        .create_booking(params(field_id, 9, 2))
        .await
        .unwrap();

    assert_eq!(booking.total_price, 300_000);
    assert_eq!(booking.status, BookingStatus::Confirmed);
}

#[tokio::test]
async fn member_payer_is_preserved() {
    let field = field(150_000);
    let field_id = field.id;
    let service = service(
        Arc::new(TestBookings::default()),
        TestFields::with_field(field),
    );

    let user_id = UserId::new();
    let mut request = params(field_id, 10, 1);
    request.payer = BookingPayer::Member { user_id };

    let booking = service.create_booking(request).await.unwrap();
    assert_eq!(booking.payer, BookingPayer::Member { user_id });
}

#[tokio::test]
async fn availability_check_is_read_only() {
    let field = field(150_000);
    let field_id = field.id;
    let bookings = Arc::new(TestBookings::default());
    let service = service(bookings.clone(), TestFields::with_field(field));

    let date = future_date();
    let slot = pitchdesk_domain::booking_slot(date, 10, 1).unwrap();
    assert!(service.is_slot_available(field_id, &slot).await.unwrap());

    service.create_booking(params(field_id, 10, 1)).await.unwrap();
    assert!(!service.is_slot_available(field_id, &slot).await.unwrap());
    assert_eq!(bookings.len(), 1);
}

#[tokio::test]
async fn monthly_report_keeps_confirmed_bookings_of_that_month_only() {
    let field = field(150_000);
    let bookings = Arc::new(TestBookings::default());
    let service = service(bookings.clone(), TestFields::with_field(field.clone()));

    let in_month = NaiveDate::from_ymd_opt(2026, 9, 10).unwrap();
    let next_month = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();

    let confirmed = BookingRecord {
        id: BookingId::new(),
        field_id: field.id,
        payer: guest(),
        slot: pitchdesk_domain::booking_slot(in_month, 10, 1).unwrap(),
        total_price: 150_000,
        status: BookingStatus::Confirmed,
        created_at: Utc::now(),
    };
    let pending = BookingRecord {
        status: BookingStatus::Pending,
        id: BookingId::new(),
        slot: pitchdesk_domain::booking_slot(in_month, 12, 1).unwrap(),
        ..confirmed.clone()
    };
    let outside = BookingRecord {
        id: BookingId::new(),
        slot: pitchdesk_domain::booking_slot(next_month, 10, 1).unwrap(),
        ..confirmed.clone()
    };
    bookings.seed(confirmed.clone());
    bookings.seed(pending);
    bookings.seed(outside);

    let report = service.monthly_report(2026, 9).await.unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].id, confirmed.id);
}

#[tokio::test]
async fn invalid_report_month_is_rejected() {
    let service = service(
        Arc::new(TestBookings::default()),
        TestFields::with_field(field(150_000)),
    );

    let result = service.monthly_report(2026, 13).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn updating_unknown_booking_is_not_found() {
    let service = service(
        Arc::new(TestBookings::default()),
        TestFields::with_field(field(150_000)),
    );

    let result = service
        .update_status(BookingId::new(), BookingStatus::Cancelled)
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}
