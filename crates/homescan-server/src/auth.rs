use std::sync::Arc;

use axum::extract::State;
use axum::http::Request;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use homescan_core::AppError;
use subtle::ConstantTimeEq;

use crate::error::ApiError;
use crate::state::AppState;

/// Middleware that validates `Authorization: Bearer <token>` against the configured token.
///
/// Runs before the handler extracts the body, so a rejected request never
/// reaches the scrape pipeline.
pub async fn require_bearer_token(
    State(state): State<Arc<AppState>>,
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(header) = request.headers().get(AUTHORIZATION) else {
        tracing::warn!("Authorization header is missing in the request");
        return ApiError::from(AppError::Unauthorized(
            "Authorization header is missing.".into(),
        )).into_response();
    };

    let expected = format!("Bearer {}", state.auth_token);
    let matches: bool = header.as_bytes().ct_eq(expected.as_bytes()).into();
    if !matches {
        tracing::error!("Invalid authorization token provided");
        return ApiError::from(AppError::Unauthorized("Invalid secret key.".into())).into_response();
    }

    next.run(request).await
}
