use axum::Json;
use utoipa::OpenApi;

use crate::api::handlers;
use crate::models::{ChatMessage, ChatRole, SleepSegment, SleepSession};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pulseboard API",
        description = "Local dashboard surface over an Apple Health export parsing service."
    ),
    paths(
        handlers::records::get_records,
        handlers::chat::post_chat,
        handlers::chat::post_suggestions,
        handlers::health::get_health,
    ),
    components(schemas(
        ChatMessage,
        ChatRole,
        SleepSegment,
        SleepSession,
        handlers::chat::ChatRequest,
        handlers::chat::ChatReply,
        handlers::chat::SuggestionsRequest,
        handlers::chat::SuggestionsReply,
        handlers::health::HealthStatus,
    )),
    tags(
        (name = "records", description = "Health record proxy"),
        (name = "chat", description = "Data-grounded assistant"),
        (name = "health", description = "Service status"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
