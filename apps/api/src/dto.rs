//! Request and response payloads for the HTTP API.

mod auth;
mod bookings;
mod common;
mod dashboard;
mod fields;
mod users;

pub use auth::{LoginRequest, LoginResponse};
pub use bookings::{
    BookingResponse, BookingSummaryResponse, CreateBookingRequest, UpdateBookingStatusRequest,
};
pub use common::{HealthResponse, IdentityResponse};
pub use dashboard::{DashboardStatsResponse, MonthlyReportQuery, MonthlyReportResponse};
pub use fields::{CreateFieldRequest, FieldResponse};
pub use users::{CreateUserRequest, UserResponse};
