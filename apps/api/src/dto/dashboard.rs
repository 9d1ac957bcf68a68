use serde::{Deserialize, Serialize};

use pitchdesk_application::DashboardStats;

use super::BookingSummaryResponse;

/// Aggregated dashboard figures.
#[derive(Debug, Serialize)]
pub struct DashboardStatsResponse {
    pub revenue: i64,
    pub bookings: i64,
    pub fields: i64,
    pub users: i64,
    pub recent_bookings: Vec<BookingSummaryResponse>,
}

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            revenue: stats.revenue,
            bookings: stats.bookings,
            fields: stats.fields,
            users: stats.users,
            recent_bookings: stats
                .recent_bookings
                .into_iter()
                .map(BookingSummaryResponse::from)
                .collect(),
        }
    }
}

/// Query parameters for the monthly report; both default to the current
/// month when omitted.
#[derive(Debug, Deserialize)]
pub struct MonthlyReportQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// Monthly revenue report over confirmed bookings.
#[derive(Debug, Serialize)]
pub struct MonthlyReportResponse {
    pub year: i32,
    pub month: u32,
    pub total_revenue: i64,
    pub total_bookings: usize,
    pub bookings: Vec<BookingSummaryResponse>,
}
