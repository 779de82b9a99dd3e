//! Conversation state machine for the dashboard assistant.
//!
//! The session owns the visible transcript and the suggestion strip. Chat
//! sends are optimistic: the user's message joins the transcript before the
//! request goes out and stays there if the request fails, so a retry does not
//! retype the question. Suggestion fetches never surface errors; a failed
//! batch just leaves the strip unchanged.

use tracing::debug;

use crate::chat::prompts;
use crate::chat::provider::LlmProvider;
use crate::error::Result;
use crate::models::ChatMessage;

/// How many suggestions the strip displays at once. The prompt asks for
/// five candidates so the batch survives required-question substitution.
const SUGGESTION_BATCH: usize = 3;

/// Assistant persona selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatMode {
    #[default]
    Analyst,
    Coach,
}

impl ChatMode {
    pub fn system_prompt(self) -> &'static str {
        match self {
            ChatMode::Analyst => prompts::analyst_system_prompt(),
            ChatMode::Coach => prompts::coach_system_prompt(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatPhase {
    #[default]
    Idle,
    Sending,
    Error,
}

/// One user-visible chat conversation.
pub struct ChatSession {
    provider: LlmProvider,
    mode: ChatMode,
    messages: Vec<ChatMessage>,
    suggestions: Vec<String>,
    phase: ChatPhase,
    error: Option<String>,
    required_suggestion: String,
    required_shown: bool,
}

impl ChatSession {
    pub fn new(provider: LlmProvider, required_suggestion: &str) -> Self {
        Self {
            provider,
            mode: ChatMode::default(),
            messages: Vec::new(),
            suggestions: Vec::new(),
            phase: ChatPhase::Idle,
            error: None,
            required_suggestion: required_suggestion.to_string(),
            required_shown: false,
        }
    }

    pub fn mode(&self) -> ChatMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ChatMode) {
        self.mode = mode;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn phase(&self) -> ChatPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.phase = ChatPhase::Idle;
        self.error = None;
    }

    /// Send one user message, grounding the request in `context` when given.
    ///
    /// The transcript gains the user message immediately and keeps it on
    /// failure. Returns the assistant reply on success.
    pub async fn send(&mut self, text: &str, context: Option<&str>) -> Result<String> {
        self.phase = ChatPhase::Sending;
        self.error = None;
        self.messages.push(ChatMessage::user(text));

        let mut wire = Vec::with_capacity(self.messages.len() + 2);
        wire.push(ChatMessage::system(self.mode.system_prompt()));
        if let Some(context) = context {
            if !context.trim().is_empty() {
                wire.push(ChatMessage::system(context));
            }
        }
        wire.extend(self.messages.iter().cloned());

        match self.provider.complete_chat(&wire).await {
            Ok(reply) => {
                self.messages.push(ChatMessage::assistant(&reply));
                self.phase = ChatPhase::Idle;
                Ok(reply)
            }
            Err(error) => {
                self.phase = ChatPhase::Error;
                self.error = Some(error.display_message());
                Err(error)
            }
        }
    }

    /// Refresh the suggestion strip from the given data context.
    ///
    /// `first_batch` marks the fetch that follows a data load; that batch is
    /// guaranteed to show the required opening question. Failures are logged
    /// and swallowed so a flaky model never blocks the dashboard.
    pub async fn load_suggestions(&mut self, context: &str, first_batch: bool) {
        let request = vec![
            ChatMessage::system(self.mode.system_prompt()),
            ChatMessage::user(&prompts::suggestions_prompt(context)),
        ];

        let lines = match self.provider.complete_chat(&request).await {
            Ok(reply) => parse_suggestion_lines(&reply),
            Err(error) => {
                debug!(error = %error, "suggestion fetch failed");
                if first_batch && !self.required_shown {
                    self.suggestions = vec![self.required_suggestion.clone()];
                    self.required_shown = true;
                }
                return;
            }
        };

        let mut batch: Vec<String> = lines.iter().take(SUGGESTION_BATCH).cloned().collect();

        if first_batch && !self.required_shown {
            if !batch.iter().any(|s| s == &self.required_suggestion) {
                if batch.len() >= SUGGESTION_BATCH {
                    batch[SUGGESTION_BATCH - 1] = self.required_suggestion.clone();
                } else {
                    batch.push(self.required_suggestion.clone());
                }
            }
            self.required_shown = true;
        }

        if !batch.is_empty() {
            self.suggestions = batch;
        }
    }
}

/// Split a model reply into clean suggestion lines.
///
/// Tolerates the numbering and bullets models add despite instructions.
pub fn parse_suggestion_lines(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(strip_list_marker)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    let line = line.trim();
    let line = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .or_else(|| line.strip_prefix("• "))
        .unwrap_or(line);

    // "1. question" or "3) question"
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return rest.trim();
        }
    }
    line.trim()
}
