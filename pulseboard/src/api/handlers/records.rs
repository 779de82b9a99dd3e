use axum::extract::State;
use axum::http::{header::HeaderName, HeaderMap, HeaderValue};
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::Query;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::api::state::AppState;
use crate::backend::RecordQuery;
use crate::error::{PulseboardError, Result};

static TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");

/// Browser-facing query parameters. `types` may repeat.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct RecordsParams {
    /// Export file path; falls back to the configured default.
    pub file_path: Option<String>,
    /// Record type filter, repeatable.
    #[serde(default)]
    pub types: Vec<String>,
    /// Inclusive ISO date lower bound.
    pub start: Option<String>,
    /// Inclusive ISO date upper bound.
    pub end: Option<String>,
}

/// Proxy the upstream records endpoint, forwarding filters verbatim and
/// echoing its `X-Total-Count` header.
#[utoipa::path(
    get,
    path = "/api/records",
    params(RecordsParams),
    responses(
        (status = 200, description = "Matching records as a JSON array"),
        (status = 400, description = "No file path given and no default configured"),
    ),
    tag = "records"
)]
pub async fn get_records(
    State(state): State<AppState>,
    Query(params): Query<RecordsParams>,
) -> Result<impl IntoResponse> {
    let file_path = params
        .file_path
        .filter(|p| !p.trim().is_empty())
        .or_else(|| state.config.backend.default_file_path.clone())
        .ok_or_else(|| {
            PulseboardError::Validation(
                "file_path is required and no default export path is configured".to_string(),
            )
        })?;

    let mut query = RecordQuery::new(file_path).with_range(params.start, params.end);
    query.types = params.types;

    debug!(types = query.types.len(), "proxying records request");
    let result = state.backend.fetch_records(&query).await?;

    let mut headers = HeaderMap::new();
    if let Some(total) = result.total {
        if let Ok(value) = HeaderValue::from_str(&total.to_string()) {
            headers.insert(TOTAL_COUNT.clone(), value);
        }
    }

    Ok((headers, Json(Value::Array(result.rows))))
}
