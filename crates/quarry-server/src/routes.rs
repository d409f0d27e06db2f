use std::sync::Arc;

use axum::Router;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use tracing::Instrument;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use quarry_core::error::AppError;
use quarry_core::traits::{FetchEngine, ResultCache};

use crate::dto::{DataResponse, HealthResponse, RawDataParams};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full router with all routes.
pub fn router<E, C>(state: Arc<AppState<E, C>>) -> Router
where
    E: FetchEngine + 'static,
    C: ResultCache + 'static,
{
    Router::new()
        .route("/v1/data", get(fetch_data::<E, C>))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/v1/data",
    params(
        ("url" = String, Query, description = "Absolute http(s) URL to fetch"),
        ("fields[NAME]" = Option<String>, Query, description = "CSS selector for each field NAME to extract"),
        ("use_browser" = Option<String>, Query, description = "Render JavaScript first; anything but \"false\" enables it"),
        ("skip_cache" = Option<String>, Query, description = "\"true\" bypasses the result cache"),
        ("timeout" = Option<String>, Query, description = "Fetch timeout in seconds (positive integer)"),
        ("headers" = Option<String>, Query, description = "JSON object of extra request headers"),
    ),
    responses(
        (status = 200, description = "Extracted field values", body = DataResponse),
        (status = 400, description = "Missing or invalid URL", body = crate::dto::ErrorResponse),
        (status = 422, description = "Content could not be parsed", body = crate::dto::ErrorResponse),
        (status = 503, description = "Upstream fetch failed", body = crate::dto::ErrorResponse),
        (status = 500, description = "Unexpected failure", body = crate::dto::ErrorResponse),
    ),
    tag = "data"
)]
pub async fn fetch_data<E, C>(
    State(state): State<Arc<AppState<E, C>>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<axum::Json<DataResponse>, ApiError>
where
    E: FetchEngine,
    C: ResultCache,
{
    let request_id = Uuid::new_v4();

    let Query(pairs) = query.map_err(|rejection| {
        ApiError::with_request_id(AppError::MissingParameter(rejection.body_text()), request_id)
    })?;

    let request = RawDataParams::from_pairs(pairs).into_request();

    let span = tracing::info_span!("scrape", %request_id, url = %request.url);
    match state.service.scrape(&request).instrument(span).await {
        Ok(result) => Ok(axum::Json(DataResponse(result))),
        Err(error) => Err(ApiError::with_request_id(error, request_id)),
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health() -> impl IntoResponse {
    axum::Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}
