//! OpenAI-backed provider via rig-core
//!
//! Bridges the workflow's [`LLMProvider`] interface to rig's OpenAI client.
//! System messages become the agent preamble; the most recent human message
//! becomes the prompt.

use async_trait::async_trait;
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;
use rig::providers::openai::Client;

use crate::config::Config;
use crate::error::LlmError;
use crate::state::{Message, Role};

use super::provider::{LLMProvider, LLMResponse};

/// OpenAI LLM provider.
pub struct OpenAIProvider {
    client: Client,
    model: String,
}

impl OpenAIProvider {
    /// Create a provider from configuration. Fails when no API key is
    /// available; the caller decides how to degrade.
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| LlmError::Config("OPENAI_API_KEY is not set".into()))?;
        if api_key.trim().is_empty() {
            return Err(LlmError::Config("OPENAI_API_KEY is empty".into()));
        }

        let client = Client::from_val(api_key.into());

        Ok(Self {
            client,
            model: config.model.clone(),
        })
    }
}

/// Join all system messages into a single preamble, if any.
fn extract_system_preamble(messages: &[Message]) -> Option<String> {
    let parts: Vec<&str> = messages
        .iter()
        .filter(|m| m.role == Role::System)
        .map(|m| m.content.as_str())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n\n"))
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    async fn complete(&self, messages: &[Message]) -> Result<LLMResponse, LlmError> {
        let mut agent_builder = self.client.agent(&self.model);

        if let Some(preamble) = extract_system_preamble(messages) {
            agent_builder = agent_builder.preamble(&preamble);
        }

        let agent = agent_builder.build();

        // The latest human message carries the role instruction for this turn.
        let prompt = messages
            .iter()
            .rfind(|m| m.role == Role::Human)
            .map(|m| m.content.clone())
            .unwrap_or_default();

        let response = agent
            .prompt(&prompt)
            .await
            .map_err(|e| LlmError::Completion(format!("OpenAI completion failed: {e}")))?;

        Ok(LLMResponse::new(Message::assistant(response)))
    }

    fn name(&self) -> &str {
        "openai"
    }
}
