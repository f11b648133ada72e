use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use tower_http::limit::RequestBodyLimitLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use homescan_core::{AppError, parse_target_url};

use crate::auth::require_bearer_token;
use crate::dto::{HealthResponse, ScrapeRequest, ScrapeResponse};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::response::AsciiJson;
use crate::state::AppState;

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the full router with all routes and middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/scrape", post(scrape))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer_token,
        ));

    let public = Router::new()
        .route("/", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public
        .merge(api)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Scrape
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/scrape",
    request_body = ScrapeRequest,
    responses(
        (status = 200, description = "Company profile", body = ScrapeResponse),
        (status = 204, description = "The page has no content"),
        (status = 400, description = "Invalid URL or upstream fetch failure", body = crate::dto::ErrorResponse),
        (status = 401, description = "Missing or invalid Authorization header", body = crate::dto::ErrorResponse),
        (status = 415, description = "The URL does not point to an HTML page", body = crate::dto::ErrorResponse),
        (status = 500, description = "HTML parsing or AI extraction failed", body = crate::dto::ErrorResponse),
    ),
    security(("APIKeyAuth" = [])),
    tag = "Scrape Homepage"
)]
pub async fn scrape(
    State(state): State<Arc<AppState>>,
    payload: Result<axum::Json<ScrapeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let axum::Json(body) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Rejected scrape request body");
        AppError::InvalidInput(rejection.body_text())
    })?;

    let url = parse_target_url(&body.url).inspect_err(|e| {
        tracing::warn!(error = %e, "Rejected scrape request URL");
    })?;

    let result = state.pipeline.scrape(url.as_str()).await?;

    Ok(AsciiJson(ScrapeResponse::from(result)))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "API is running", body = HealthResponse),
    ),
    tag = "Health Check"
)]
pub async fn health() -> impl IntoResponse {
    axum::Json(HealthResponse {
        message: "API is running successfully",
    })
}
