use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub chat: ChatConfig,
    pub llm: Option<LlmConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Connection settings for the upstream Apple Health parsing API.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the records/sessions/vitals service.
    pub base_url: String,
    /// Export file path used when a request does not supply one.
    pub default_file_path: Option<String>,
    pub timeout_secs: u64,
}

/// Limits and business rules for the chat assistant surface.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Maximum number of messages accepted per chat request.
    pub max_messages: usize,
    /// Maximum total content length (characters) per chat request.
    pub max_total_chars: usize,
    /// Sample-row cap when summarizing loaded records for context.
    pub max_record_rows: usize,
    /// Series cap when summarizing loaded vitals for context.
    pub max_series: usize,
    /// Per-series point cap when summarizing loaded vitals for context.
    pub max_points: usize,
    /// Suggestion text that must appear in the first batch after a bulk
    /// load. Business rule inherited from the original dashboard; its
    /// necessity is unconfirmed, so it stays configurable.
    pub required_suggestion: String,
}

/// LLM configuration for the chat completions backend.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

pub const DEFAULT_REQUIRED_SUGGESTION: &str =
    "What does my data say about my overall health?";

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_messages: parse_env_or("CHAT_MAX_MESSAGES", 100),
            max_total_chars: parse_env_or("CHAT_MAX_TOTAL_CHARS", 16000),
            max_record_rows: parse_env_or("CHAT_CONTEXT_RECORD_ROWS", 50),
            max_series: parse_env_or("CHAT_CONTEXT_SERIES", 12),
            max_points: parse_env_or("CHAT_CONTEXT_POINTS", 50),
            required_suggestion: env::var("CHAT_REQUIRED_SUGGESTION")
                .unwrap_or_else(|_| DEFAULT_REQUIRED_SUGGESTION.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("PULSEBOARD_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("PULSEBOARD_PORT", 3000),
            },
            backend: BackendConfig {
                base_url: env::var("HEALTH_API_URL")
                    .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
                default_file_path: env::var("HEALTH_EXPORT_PATH").ok(),
                timeout_secs: parse_env_or("HEALTH_API_TIMEOUT", 60),
            },
            chat: ChatConfig::default(),
            llm: env::var("LLM_MODEL").ok().map(|model| LlmConfig {
                model,
                api_key: env::var("LLM_API_KEY").ok(),
                base_url: env::var("LLM_BASE_URL").ok(),
                timeout_secs: parse_env_or("LLM_TIMEOUT", 30),
                max_retries: parse_env_or("LLM_MAX_RETRIES", 3),
            }),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Known LLM providers that use OpenAI-compatible APIs.
pub const KNOWN_LLM_PROVIDERS: &[&str] = &["openai", "openrouter", "ollama", "lmstudio"];

/// Parse an LLM model name into a (provider, model) tuple.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Default to treating the whole string as a local model
    ("local", model)
}
