use std::sync::Arc;

use crate::chat::api::LlmApiClient;
use crate::config::{parse_llm_provider_model, LlmConfig};
use crate::error::{PulseboardError, Result};
use crate::models::ChatMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmBackend {
    OpenAI,
    OpenRouter,
    Ollama,
    LmStudio,
    OpenAICompatible { base_url: String },
    Unavailable { reason: String },
}

/// Availability wrapper around the chat completions backend.
#[derive(Debug, Clone)]
pub struct LlmProvider {
    backend: LlmBackend,
    config: Option<Arc<LlmConfig>>,
}

impl LlmProvider {
    pub fn new(config: Option<&LlmConfig>) -> Self {
        let Some(config) = config else {
            return Self::unavailable("No LLM configuration provided");
        };

        let (provider, _model) = parse_llm_provider_model(&config.model);

        let backend = match provider.to_lowercase().as_str() {
            "openai" => LlmBackend::OpenAI,
            "openrouter" => LlmBackend::OpenRouter,
            "ollama" => LlmBackend::Ollama,
            "lmstudio" => LlmBackend::LmStudio,
            _ => {
                if let Some(base_url) = &config.base_url {
                    LlmBackend::OpenAICompatible {
                        base_url: base_url.clone(),
                    }
                } else {
                    LlmBackend::Unavailable {
                        reason: format!("Unknown provider in model: {}", config.model),
                    }
                }
            }
        };

        Self {
            backend,
            config: Some(Arc::new(config.clone())),
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            backend: LlmBackend::Unavailable {
                reason: reason.to_string(),
            },
            config: None,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, LlmBackend::Unavailable { .. })
    }

    /// Whether the configured provider can actually be called: hosted
    /// providers additionally need an API key.
    pub fn has_credential(&self) -> bool {
        let Some(config) = self.config() else {
            return false;
        };
        match self.backend {
            LlmBackend::Unavailable { .. } => false,
            LlmBackend::Ollama | LlmBackend::LmStudio => true,
            _ => config.api_key.is_some(),
        }
    }

    pub fn backend(&self) -> &LlmBackend {
        &self.backend
    }

    pub fn config(&self) -> Option<&LlmConfig> {
        self.config.as_deref()
    }

    pub fn model_id(&self) -> Option<&str> {
        self.config().map(|c| c.model.as_str())
    }

    pub async fn complete_chat(&self, messages: &[ChatMessage]) -> Result<String> {
        if !self.is_available() {
            return Err(PulseboardError::LlmUnavailable(self.unavailable_reason()));
        }

        let config = self.config().ok_or_else(|| {
            PulseboardError::LlmUnavailable("No LLM configuration provided".to_string())
        })?;

        let client = LlmApiClient::new(config)?;
        client.complete_chat(messages).await
    }

    fn unavailable_reason(&self) -> String {
        match &self.backend {
            LlmBackend::Unavailable { reason } => reason.clone(),
            _ => "LLM backend is not available".to_string(),
        }
    }
}
