//! Booking domain types: time slots, statuses, and payers.
//!
//! Slots are half-open `[start, end)` intervals so that back-to-back bookings
//! (one ending exactly when the next starts) never conflict.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use pitchdesk_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::UserId;

/// Unique identifier for a booking record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(Uuid);

impl BookingId {
    /// Creates a new random booking identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a booking identifier from an existing UUID value.
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

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Lifecycle status of a booking.
///
/// Cancelled bookings are permanently excluded from conflict checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Created but not yet confirmed.
    Pending,
    /// Confirmed and counted in revenue.
    Confirmed,
    /// Cancelled; the slot is free again.
    Cancelled,
}

impl BookingStatus {
    /// Returns the storage string for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(AppError::Validation(format!(
                "unknown booking status '{value}'"
            ))),
        }
    }
}

/// First bookable hour of the day.
pub const OPENING_HOUR: u32 = 8;

/// Hour at which the last booking must end.
pub const CLOSING_HOUR: u32 = 22;

/// Half-open `[start, end)` time range claimed by a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeSlot {
    /// Creates a slot, rejecting zero-duration and inverted ranges.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Self> {
        if start >= end {
            return Err(AppError::Validation(
                "slot start must be before slot end".to_owned(),
            ));
        }

        Ok(Self { start, end })
    }

    /// Returns the inclusive start of the slot.
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the exclusive end of the slot.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Half-open overlap test: touching endpoints do not conflict.
    #[must_use]
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Builds the slot for a booking request expressed as a date, a whole start
/// hour, and a duration in hours, enforcing operating hours.
pub fn booking_slot(date: NaiveDate, start_hour: u32, duration_hours: u32) -> AppResult<TimeSlot> {
    if duration_hours == 0 {
        return Err(AppError::Validation(
            "booking duration must be at least one hour".to_owned(),
        ));
    }

    // Checked add: hour values come straight from request bodies.
    let Some(end_hour) = start_hour.checked_add(duration_hours) else {
        return Err(AppError::Validation(format!(
            "bookings are only available between {OPENING_HOUR:02}:00 and {CLOSING_HOUR:02}:00"
        )));
    };
    if start_hour < OPENING_HOUR || end_hour > CLOSING_HOUR {
        return Err(AppError::Validation(format!(
            "bookings are only available between {OPENING_HOUR:02}:00 and {CLOSING_HOUR:02}:00"
        )));
    }

    let start = date
        .and_hms_opt(start_hour, 0, 0)
        .ok_or_else(|| AppError::Validation(format!("invalid start hour {start_hour}")))?
        .and_utc();
    let end = date
        .and_hms_opt(end_hour, 0, 0)
        .ok_or_else(|| AppError::Validation(format!("invalid end hour {end_hour}")))?
        .and_utc();

    TimeSlot::new(start, end)
}

/// Who pays for a booking: a registered member or a walk-in guest.
///
/// Modeled as a tagged variant so that exactly one of the two is present by
/// construction instead of a pair of nullable columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingPayer {
    /// A registered member identified by user id.
    Member {
        /// The paying member's user id.
        user_id: UserId,
    },
    /// A walk-in guest identified by name and optional phone number.
    Guest {
        /// Guest display name.
        name: NonEmptyString,
        /// Guest contact phone, if given.
        phone: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use proptest::prelude::*;

    use super::*;

    fn slot(start_hour: u32, end_hour: u32) -> TimeSlot {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        TimeSlot::new(
            date.and_hms_opt(start_hour, 0, 0).unwrap().and_utc(),
            date.and_hms_opt(end_hour, 0, 0).unwrap().and_utc(),
        )
        .unwrap()
    }

    #[test]
    fn adjacent_slots_do_not_overlap() {
        // 10:00-11:00 and 11:00-12:00 are compatible.
        assert!(!slot(10, 11).overlaps(&slot(11, 12)));
        assert!(!slot(11, 12).overlaps(&slot(10, 11)));
    }

    #[test]
    fn partial_overlap_is_detected() {
        // 10:00-12:00 and 11:00-13:00 collide.
        assert!(slot(10, 12).overlaps(&slot(11, 13)));
        assert!(slot(11, 13).overlaps(&slot(10, 12)));
    }

    #[test]
    fn contained_slot_overlaps() {
        assert!(slot(9, 14).overlaps(&slot(10, 11)));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let start = date.and_hms_opt(12, 0, 0).unwrap().and_utc();
        let end = date.and_hms_opt(10, 0, 0).unwrap().and_utc();
        assert!(TimeSlot::new(start, end).is_err());
        assert!(TimeSlot::new(start, start).is_err());
    }

    #[test]
    fn slot_before_opening_is_rejected() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        assert!(booking_slot(date, 7, 1).is_err());
    }

    #[test]
    fn slot_past_closing_is_rejected() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        assert!(booking_slot(date, 21, 2).is_err());
    }

    #[test]
    fn last_slot_of_the_day_is_allowed() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let slot = booking_slot(date, 21, 1);
        assert!(slot.is_ok());
    }

    #[test]
    fn huge_hour_values_are_rejected_not_overflowed() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        assert!(booking_slot(date, u32::MAX, 1).is_err());
        assert!(booking_slot(date, 8, u32::MAX).is_err());
    }

    #[test]
    fn zero_duration_is_rejected() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        assert!(booking_slot(date, 10, 0).is_err());
    }

    #[test]
    fn status_round_trips_storage_string() {
        for status in ["pending", "confirmed", "cancelled"] {
            assert_eq!(
                status.parse::<BookingStatus>().map(|parsed| parsed.as_str()).ok(),
                Some(status)
            );
        }
        assert!("paid".parse::<BookingStatus>().is_err());
    }

    proptest! {
        /// The half-open overlap test matches the interval formula and is
        /// symmetric for arbitrary hour-aligned slots.
        #[test]
        fn overlap_matches_interval_formula(
            start_a in 0i64..1000,
            len_a in 1i64..48,
            start_b in 0i64..1000,
            len_b in 1i64..48,
        ) {
            let base = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
                .and_hms_opt(0, 0, 0).unwrap()
                .and_utc();
            let hours = chrono::Duration::hours;

            let a = TimeSlot::new(base + hours(start_a), base + hours(start_a + len_a)).unwrap();
            let b = TimeSlot::new(base + hours(start_b), base + hours(start_b + len_b)).unwrap();

            let expected = start_a < start_b + len_b && start_a + len_a > start_b;
            prop_assert_eq!(a.overlaps(&b), expected);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }
}
