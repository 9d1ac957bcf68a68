use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use pitchdesk_domain::FieldId;

use crate::dto::{CreateFieldRequest, FieldResponse};
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

/// GET /api/fields - List all fields ordered by name.
pub async fn list_fields_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<FieldResponse>>> {
    let fields = state.field_service.list_fields().await?;
    Ok(Json(fields.into_iter().map(FieldResponse::from).collect()))
}

/// POST /api/fields - Create a field.
pub async fn create_field_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateFieldRequest>,
) -> ApiResult<(StatusCode, Json<FieldResponse>)> {
    let definition = payload.into_definition()?;
    let field = state.field_service.create_field(definition).await?;
    Ok((StatusCode::CREATED, Json(FieldResponse::from(field))))
}

/// DELETE /api/fields/{id} - Delete a field.
pub async fn delete_field_handler(
    State(state): State<AppState>,
    Path(field_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .field_service
        .delete_field(FieldId::from_uuid(field_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
