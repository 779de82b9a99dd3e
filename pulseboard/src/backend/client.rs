//! HTTP client for the upstream Apple Health parsing API, plus the response
//! normalizer that turns its successes and failures into displayable shapes.

use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::config::BackendConfig;
use crate::error::{PulseboardError, Result};
use crate::backend::query::RecordQuery;

/// Rows plus the passthrough `X-Total-Count` header, when present.
#[derive(Debug, Clone, Default)]
pub struct FetchResult {
    pub rows: Vec<Value>,
    pub total: Option<u64>,
}

/// Normalize an upstream response into rows or a displayable error.
///
/// The body is always handled as text first. Non-2xx statuses yield an
/// error whose message is the upstream `detail` or `error` field when one
/// exists, else `Request failed (<status>)`. 2xx bodies must be a JSON
/// array; a blank body counts as an empty array. Nothing panics past this
/// boundary.
pub fn normalize_response(status: u16, body: &str) -> Result<Vec<Value>> {
    if !(200..300).contains(&status) {
        return Err(PulseboardError::Upstream {
            status,
            message: extract_error_message(status, body),
        });
    }

    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(rows)) => Ok(rows),
        _ => Err(PulseboardError::Upstream {
            status,
            message: "Unexpected response from health backend".to_string(),
        }),
    }
}

fn extract_error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["detail", "error"] {
            if let Some(message) = value.get(key).and_then(Value::as_str) {
                return message.to_string();
            }
        }
    }
    format!("Request failed ({status})")
}

/// Thin reqwest wrapper over the upstream records/sessions/vitals endpoints.
#[derive(Debug, Clone)]
pub struct HealthApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HealthApiClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn fetch_records(&self, query: &RecordQuery) -> Result<FetchResult> {
        self.fetch("records", query).await
    }

    pub async fn fetch_sessions(&self, query: &RecordQuery) -> Result<FetchResult> {
        self.fetch("sessions", query).await
    }

    pub async fn fetch_vitals(&self, query: &RecordQuery) -> Result<FetchResult> {
        self.fetch("vitals", query).await
    }

    /// Whether the upstream service answers its health probe.
    pub async fn ping(&self) -> bool {
        match self.base_url.join("health") {
            Ok(url) => matches!(
                self.http.get(url).send().await,
                Ok(response) if response.status().is_success()
            ),
            Err(_) => false,
        }
    }

    async fn fetch(&self, endpoint: &str, query: &RecordQuery) -> Result<FetchResult> {
        query.validate()?;

        let url = self.base_url.join(endpoint)?;
        let response = self
            .http
            .get(url)
            .query(&query.query_pairs())
            .send()
            .await?;

        let status = response.status().as_u16();
        let total = response
            .headers()
            .get("x-total-count")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let body = response.text().await.unwrap_or_default();

        let rows = normalize_response(status, &body)?;
        Ok(FetchResult { rows, total })
    }
}
