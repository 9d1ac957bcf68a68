use axum::Json;
use axum::extract::{Query, State};
use chrono::{Datelike, Utc};

use crate::dto::{BookingSummaryResponse, MonthlyReportQuery, MonthlyReportResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/reports/monthly - Confirmed bookings and revenue for a month.
///
/// Defaults to the current month when `year` or `month` are omitted.
pub async fn monthly_report_handler(
    State(state): State<AppState>,
    Query(query): Query<MonthlyReportQuery>,
) -> ApiResult<Json<MonthlyReportResponse>> {
    let now = Utc::now();
    let year = query.year.unwrap_or_else(|| now.year());
    let month = query.month.unwrap_or_else(|| now.month());

    let bookings = state.booking_service.monthly_report(year, month).await?;

    let total_revenue = bookings.iter().map(|booking| booking.total_price).sum();
    let bookings: Vec<BookingSummaryResponse> = bookings
        .into_iter()
        .map(BookingSummaryResponse::from)
        .collect();

    Ok(Json(MonthlyReportResponse {
        year,
        month,
        total_revenue,
        total_bookings: bookings.len(),
        bookings,
    }))
}
