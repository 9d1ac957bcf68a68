//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod postgres_booking_repository;
mod postgres_field_repository;
mod postgres_user_repository;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use postgres_booking_repository::PostgresBookingRepository;
pub use postgres_field_repository::PostgresFieldRepository;
pub use postgres_user_repository::PostgresUserRepository;
