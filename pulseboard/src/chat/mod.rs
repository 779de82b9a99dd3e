mod api;
pub mod context;
pub mod prompts;
mod provider;
pub mod session;

pub use api::LlmApiClient;
pub use context::{build_context, ActiveTab, ContextLimits};
pub use provider::{LlmBackend, LlmProvider};
pub use session::{ChatMode, ChatPhase, ChatSession};
