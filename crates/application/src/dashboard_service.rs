//! Dashboard statistics aggregation.

use std::sync::Arc;

use pitchdesk_core::AppResult;

use crate::{BookingRepository, BookingSummary, FieldRepository, UserRepository};

/// How many recent bookings the dashboard shows.
const RECENT_BOOKINGS_LIMIT: i64 = 5;

/// Aggregated figures for the admin dashboard.
#[derive(Debug, Clone)]
pub struct DashboardStats {
    /// Total revenue over confirmed bookings.
    pub revenue: i64,
    /// Total number of bookings regardless of status.
    pub bookings: i64,
    /// Total number of fields.
    pub fields: i64,
    /// Total number of users.
    pub users: i64,
    /// Most recently created bookings.
    pub recent_bookings: Vec<BookingSummary>,
}

/// Application service aggregating dashboard figures.
#[derive(Clone)]
pub struct DashboardService {
    booking_repository: Arc<dyn BookingRepository>,
    field_repository: Arc<dyn FieldRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl DashboardService {
    /// Creates a new dashboard service.
    #[must_use]
    pub fn new(
        booking_repository: Arc<dyn BookingRepository>,
        field_repository: Arc<dyn FieldRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            booking_repository,
            field_repository,
            user_repository,
        }
    }

    /// Collects the dashboard statistics. Read-only.
    pub async fn stats(&self) -> AppResult<DashboardStats> {
        let revenue = self.booking_repository.confirmed_revenue().await?;
        let bookings = self.booking_repository.count().await?;
        let fields = self.field_repository.count().await?;
        let users = self.user_repository.count().await?;
        let recent_bookings = self.booking_repository.recent(RECENT_BOOKINGS_LIMIT).await?;

        Ok(DashboardStats {
            revenue,
            bookings,
            fields,
            users,
            recent_bookings,
        })
    }
}
