use axum::Json;
use axum::extract::State;

use crate::dto::DashboardStatsResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/dashboard/stats - Aggregated figures for the admin landing page.
pub async fn dashboard_stats_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<DashboardStatsResponse>> {
    let stats = state.dashboard_service.stats().await?;
    Ok(Json(DashboardStatsResponse::from(stats)))
}
