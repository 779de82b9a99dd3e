use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    /// Whether the upstream parsing API answers its health probe.
    pub backend_reachable: bool,
    /// Whether an LLM is configured with a usable credential.
    pub llm_ready: bool,
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service status", body = HealthStatus)),
    tag = "health"
)]
pub async fn get_health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        backend_reachable: state.backend.ping().await,
        llm_ready: state.llm.has_credential(),
    })
}
