use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pitchdesk_core::AppError;
use serde::Serialize;

/// API error payload.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    message: String,
}

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorResponse {
            message: self.0.to_string(),
        });

        (status, payload).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;

/// JSON body extractor whose rejections surface as validation errors.
///
/// Existing clients expect 400 for malformed or incomplete request bodies,
/// not axum's default 415/422 rejections.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(request, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::Validation(rejection.body_text()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use serde::Deserialize;

    use super::*;

    fn status_for(error: AppError) -> StatusCode {
        ApiError(error).into_response().status()
    }

    #[derive(Debug, Deserialize)]
    struct EchoBody {
        #[allow(dead_code)]
        message: String,
    }

    async fn body_status(request: Option<Request>) -> Option<StatusCode> {
        let request = request?;
        ApiJson::<EchoBody>::from_request(request, &())
            .await
            .err()
            .map(|error| error.into_response().status())
    }

    #[tokio::test]
    async fn malformed_json_body_maps_to_bad_request() {
        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from("not json"))
            .ok();
        assert_eq!(body_status(request).await, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn incomplete_json_body_maps_to_bad_request() {
        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .ok();
        assert_eq!(body_status(request).await, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn missing_content_type_maps_to_bad_request() {
        let request = Request::builder()
            .method("POST")
            .body(Body::from("{\"message\":\"hi\"}"))
            .ok();
        assert_eq!(body_status(request).await, Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn errors_map_to_expected_statuses() {
        assert_eq!(
            status_for(AppError::Validation("bad".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(AppError::NotFound("missing".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(AppError::Conflict("taken".to_owned())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(AppError::Unauthorized("nope".to_owned())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for(AppError::Forbidden("nope".to_owned())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(AppError::RateLimited("locked".to_owned())),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            status_for(AppError::Internal("boom".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
