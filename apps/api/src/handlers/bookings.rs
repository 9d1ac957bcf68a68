use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use pitchdesk_domain::BookingId;

use crate::dto::{
    BookingResponse, BookingSummaryResponse, CreateBookingRequest, UpdateBookingStatusRequest,
};
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

/// GET /api/bookings - List all bookings, newest first.
pub async fn list_bookings_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<BookingSummaryResponse>>> {
    let bookings = state.booking_service.list_bookings().await?;
    Ok(Json(
        bookings
            .into_iter()
            .map(BookingSummaryResponse::from)
            .collect(),
    ))
}

/// POST /api/bookings - Create a booking.
pub async fn create_booking_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateBookingRequest>,
) -> ApiResult<(StatusCode, Json<BookingResponse>)> {
    let params = payload.into_params()?;
    let booking = state.booking_service.create_booking(params).await?;
    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

/// PUT /api/bookings/{id}/status - Change the status of a booking.
pub async fn update_booking_status_handler(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
    ApiJson(payload): ApiJson<UpdateBookingStatusRequest>,
) -> ApiResult<Json<BookingSummaryResponse>> {
    let status = payload.status()?;
    let booking = state
        .booking_service
        .update_status(BookingId::from_uuid(booking_id), status)
        .await?;
    Ok(Json(BookingSummaryResponse::from(booking)))
}

/// DELETE /api/bookings/{id} - Delete a booking.
pub async fn delete_booking_handler(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .booking_service
        .delete_booking(BookingId::from_uuid(booking_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
