use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use crate::api::handlers::{chat, health, records};
use crate::api::openapi::{openapi_json, ApiDoc};
use crate::api::state::AppState;

/// Build the full application router. CORS is permissive: the service
/// binds locally and the browser dashboard is served from another port.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/records", get(records::get_records))
        .route("/api/chat", post(chat::post_chat))
        .route("/api/chat/suggestions", post(chat::post_suggestions))
        .route("/api/health", get(health::get_health))
        .route("/openapi.json", get(openapi_json))
        .merge(Redoc::with_url("/docs", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
