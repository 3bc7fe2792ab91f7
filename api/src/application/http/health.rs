use axum::{Router, extract::State, routing::get};
use basket_core::domain::health::{entities::ReadinessStatus, ports::HealthCheckService};
use utoipa::OpenApi;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(OpenApi)]
#[openapi(paths(live, ready))]
pub struct HealthApiDoc;

#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    summary = "Liveness probe",
    responses((status = 200, body = String))
)]
pub async fn live() -> &'static str {
    "ok"
}

#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    summary = "Readiness probe",
    description = "Names the OCR backend and the models loaded at startup",
    responses((status = 200, body = ReadinessStatus))
)]
pub async fn ready(State(state): State<AppState>) -> Result<Response<ReadinessStatus>, ApiError> {
    let status = state.service.readiness().await.map_err(ApiError::from)?;
    Ok(Response::OK(status))
}

pub fn health_routes(root_path: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("{}/health/live", root_path), get(live))
        .route(&format!("{}/health/ready", root_path), get(ready))
}
