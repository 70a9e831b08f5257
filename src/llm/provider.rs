//! LLM provider trait and the lazy-failing stand-in
//!
//! [`LLMProvider`] is the uniform "conversation in, text out" operation the
//! nodes depend on. [`UnavailableProvider`] is the required resilience
//! behavior for startup failures: construction problems are logged, never
//! thrown, and surface as a descriptive error only when a call is actually
//! made, so workflow construction and unrelated code paths stay usable.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::Config;
use crate::error::LlmError;
use crate::state::Message;

use super::openai::OpenAIProvider;

/// A single completion response.
#[derive(Debug, Clone)]
pub struct LLMResponse {
    /// The assistant's reply.
    pub message: Message,
}

impl LLMResponse {
    pub fn new(message: Message) -> Self {
        Self { message }
    }

    /// The reply text.
    pub fn content(&self) -> &str {
        &self.message.content
    }
}

/// Provider-agnostic completion interface.
///
/// Request: the ordered conversation history (including the role's fixed
/// system instruction as its first entry). Response: a single text blob.
/// The call blocks the workflow step until the model responds or errors;
/// there is no timeout layer here.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate one completion for the given conversation.
    async fn complete(&self, messages: &[Message]) -> Result<LLMResponse, LlmError>;

    /// Provider name for logging.
    fn name(&self) -> &str;
}

/// Stand-in installed when provider construction fails at startup.
///
/// Holds the original failure reason and raises it lazily on every call.
pub struct UnavailableProvider {
    reason: String,
}

impl UnavailableProvider {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
impl LLMProvider for UnavailableProvider {
    async fn complete(&self, _messages: &[Message]) -> Result<LLMResponse, LlmError> {
        Err(LlmError::Unavailable(format!(
            "LLM initialization failed, check your API key and credentials: {}",
            self.reason
        )))
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}

/// Construct the process-wide provider from configuration.
///
/// Never fails: a missing or invalid credential degrades to the
/// lazy-failing stand-in instead of preventing startup.
pub fn build_provider(config: &Config) -> Arc<dyn LLMProvider> {
    match OpenAIProvider::new(config) {
        Ok(provider) => {
            info!(model = %config.model, "initialized OpenAI provider");
            Arc::new(provider)
        }
        Err(err) => {
            error!(%err, "failed to initialize LLM provider; installing lazy-failing stand-in");
            Arc::new(UnavailableProvider::new(err.to_string()))
        }
    }
}
