use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::extractors::AppJson;
use crate::api::state::AppState;
use crate::chat::{prompts, ChatMode};
use crate::error::{PulseboardError, Result};
use crate::models::ChatMessage;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ChatRequest {
    /// Conversation log, oldest first.
    pub messages: Vec<ChatMessage>,
    /// Optional data summary grounding the conversation.
    #[serde(default)]
    pub context: Option<String>,
    /// Assistant persona: "analyst" (default) or "coach".
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ChatReply {
    pub reply: String,
    pub model: String,
}

/// Run one chat completion over the submitted conversation.
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatReply),
        (status = 400, description = "Malformed or oversized request"),
        (status = 500, description = "No LLM credential configured"),
        (status = 429, description = "Upstream rate limit"),
    ),
    tag = "chat"
)]
pub async fn post_chat(
    State(state): State<AppState>,
    AppJson(request): AppJson<ChatRequest>,
) -> Result<AppJson<ChatReply>> {
    validate_request(&request, &state)?;

    if !state.llm.has_credential() {
        return Err(PulseboardError::LlmUnavailable(
            "LLM API key is not configured on the server".to_string(),
        ));
    }

    let mode = match request.mode.as_deref() {
        Some("coach") => ChatMode::Coach,
        _ => ChatMode::Analyst,
    };

    let mut wire = Vec::with_capacity(request.messages.len() + 2);
    wire.push(ChatMessage::system(mode.system_prompt()));
    if let Some(context) = &request.context {
        if !context.trim().is_empty() {
            wire.push(ChatMessage::system(context));
        }
    }
    wire.extend(request.messages);

    let reply = state.llm.complete_chat(&wire).await?;
    let model = state.llm.model_id().unwrap_or_default().to_string();
    info!(model, messages = wire.len(), "chat completion served");

    Ok(AppJson(ChatReply { reply, model }))
}

fn validate_request(request: &ChatRequest, state: &AppState) -> Result<()> {
    let limits = &state.config.chat;

    if request.messages.is_empty() {
        return Err(PulseboardError::Validation(
            "messages must not be empty".to_string(),
        ));
    }

    if request.messages.len() > limits.max_messages {
        return Err(PulseboardError::Validation(format!(
            "Too many messages: {} exceeds the limit of {}",
            request.messages.len(),
            limits.max_messages
        )));
    }

    let total_chars: usize = request
        .messages
        .iter()
        .map(|m| m.content.chars().count())
        .sum();
    if total_chars > limits.max_total_chars {
        return Err(PulseboardError::Validation(format!(
            "Conversation too large: {} characters exceeds the limit of {}",
            total_chars, limits.max_total_chars
        )));
    }

    Ok(())
}

/// Candidate follow-up questions for the current data context.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SuggestionsRequest {
    pub context: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SuggestionsReply {
    pub suggestions: Vec<String>,
}

#[utoipa::path(
    post,
    path = "/api/chat/suggestions",
    request_body = SuggestionsRequest,
    responses(
        (status = 200, description = "Suggested follow-up questions", body = SuggestionsReply),
        (status = 500, description = "No LLM credential configured"),
    ),
    tag = "chat"
)]
pub async fn post_suggestions(
    State(state): State<AppState>,
    AppJson(request): AppJson<SuggestionsRequest>,
) -> Result<AppJson<SuggestionsReply>> {
    if !state.llm.has_credential() {
        return Err(PulseboardError::LlmUnavailable(
            "LLM API key is not configured on the server".to_string(),
        ));
    }

    let wire = vec![
        ChatMessage::system(ChatMode::Analyst.system_prompt()),
        ChatMessage::user(&prompts::suggestions_prompt(&request.context)),
    ];
    let reply = state.llm.complete_chat(&wire).await?;
    let suggestions = crate::chat::session::parse_suggestion_lines(&reply);

    Ok(AppJson(SuggestionsReply { suggestions }))
}
