use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PulseboardError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("LLM unavailable: {0}")]
    LlmUnavailable(String),

    #[error("LLM rate limit exceeded, retry after {retry_after:?} seconds")]
    LlmRateLimit { retry_after: Option<u64> },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl PulseboardError {
    /// Message safe to show inline in the dashboard. Upstream errors carry
    /// the already-normalized message; transport failures collapse to a
    /// generic string rather than leaking reqwest internals.
    pub fn display_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Upstream { message, .. } => message.clone(),
            Self::Http(_) => "Network request failed".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for PulseboardError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            PulseboardError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            PulseboardError::Upstream { status, message } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                message.clone(),
            ),
            PulseboardError::Http(_) => (StatusCode::BAD_GATEWAY, self.display_message()),
            PulseboardError::Json(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            PulseboardError::UrlParse(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            PulseboardError::Llm(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            PulseboardError::LlmUnavailable(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            PulseboardError::LlmRateLimit { .. } => {
                (StatusCode::TOO_MANY_REQUESTS, self.to_string())
            }
            PulseboardError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, PulseboardError>;
