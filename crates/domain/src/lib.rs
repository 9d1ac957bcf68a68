//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod account;
mod booking;
mod field;

pub use account::{
    LOCKOUT_SECONDS, LockoutState, MAX_FAILED_LOGINS, Role, UserId, validate_email,
};
pub use booking::{
    BookingId, BookingPayer, BookingStatus, CLOSING_HOUR, OPENING_HOUR, TimeSlot, booking_slot,
};
pub use field::{FieldDefinition, FieldId};
