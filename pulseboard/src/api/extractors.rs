use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::PulseboardError;

/// JSON extractor whose rejections render as our standard error envelope
/// instead of axum's plain-text defaults.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(PulseboardError))]
pub struct AppJson<T>(pub T);

impl<T: Serialize> IntoResponse for AppJson<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

impl From<JsonRejection> for PulseboardError {
    fn from(rejection: JsonRejection) -> Self {
        PulseboardError::Validation(rejection.body_text())
    }
}
