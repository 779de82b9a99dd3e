use std::sync::Arc;

use crate::backend::HealthApiClient;
use crate::chat::LlmProvider;
use crate::config::Config;
use crate::error::Result;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub backend: HealthApiClient,
    pub llm: LlmProvider,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let backend = HealthApiClient::new(&config.backend)?;
        let llm = match &config.llm {
            Some(llm_config) => LlmProvider::new(Some(llm_config)),
            None => LlmProvider::unavailable("LLM_MODEL is not set"),
        };
        Ok(Self {
            config: Arc::new(config),
            backend,
            llm,
        })
    }
}
