//! HTTP handlers for the admin API.

pub mod bookings;
pub mod dashboard;
pub mod fields;
pub mod health;
pub mod reports;
pub mod users;
