//! Application services and ports.

#![forbid(unsafe_code)]

mod auth_service;
mod booking_service;
mod dashboard_service;
mod field_service;
mod user_service;

pub use auth_service::{AccountRecord, AccountRepository, AuthService, LoginOutcome, PasswordHasher};
pub use booking_service::{
    BookingRecord, BookingRepository, BookingService, BookingSummary, CreateBookingParams,
    NewBooking,
};
pub use dashboard_service::{DashboardService, DashboardStats};
pub use field_service::{FieldRecord, FieldRepository, FieldService};
pub use user_service::{
    CreateUserParams, NewUser, PASSWORD_MIN_LENGTH, UserRepository, UserService, UserSummary,
};
