use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use quarry_core::error::AppError;

use crate::dto::{ErrorBody, ErrorResponse};

/// Wrapper so we can implement `IntoResponse` for `AppError`.
pub struct ApiError {
    error: AppError,
    request_id: Option<Uuid>,
}

impl ApiError {
    /// Attach the request-tracking id echoed in the error envelope.
    pub fn with_request_id(error: AppError, request_id: Uuid) -> Self {
        Self {
            error,
            request_id: Some(request_id),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self {
            error,
            request_id: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.error {
            AppError::InvalidUrl(_) | AppError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            AppError::FetchUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ParseFailure(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            error: ErrorBody {
                message: self.error.to_string(),
                status: status.as_u16(),
                request_id: self.request_id.map(|id| id.to_string()),
            },
        };

        (status, axum::Json(body)).into_response()
    }
}
