use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use homescan_core::AppError;

use crate::dto::ErrorResponse;
use crate::response::AsciiJson;

/// Header carrying the explanation on 204 responses, which cannot have a body.
pub const DETAIL_HEADER: &str = "x-error-detail";

/// Wrapper so we can implement `IntoResponse` for `AppError`.
///
/// Only the status code and a fixed message leave the process; the wrapped
/// error's own text was already logged where it was raised.
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code and caller-facing message for the wrapped error.
    pub fn status_and_detail(&self) -> (StatusCode, String) {
        match &self.0 {
            AppError::NoContent => (
                StatusCode::NO_CONTENT,
                "No content available at the URL.".to_string(),
            ),
            AppError::UnsupportedMediaType(content_type) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                format!(
                    "Unsupported media type: {content_type}. The URL must point to an HTML page."
                ),
            ),
            AppError::UpstreamHttpError { .. } | AppError::FetchFailed(_) => {
                (StatusCode::BAD_REQUEST, "Error fetching URL.".to_string())
            }
            AppError::ParseFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "HTML parsing failed".to_string(),
            ),
            AppError::ExtractionFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AI extraction failed".to_string(),
            ),
            AppError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message.clone()),
            AppError::InvalidInput(_) => (
                StatusCode::BAD_REQUEST,
                "Invalid request: url must be an absolute http or https URL.".to_string(),
            ),
            AppError::ConfigError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();

        if status == StatusCode::NO_CONTENT {
            let mut response = status.into_response();
            if let Ok(value) = HeaderValue::from_str(&detail) {
                response.headers_mut().insert(DETAIL_HEADER, value);
            }
            return response;
        }

        let body = ErrorResponse {
            error: self.0.kind().to_string(),
            detail,
        };

        (status, AsciiJson(body)).into_response()
    }
}
