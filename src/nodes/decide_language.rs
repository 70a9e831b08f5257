//! Language selector
//!
//! Asks the model to pick one of the four permitted implementation languages
//! for the task. The lower-cased reply is parsed into the closed
//! [`Language`] enum; anything outside the enumeration surfaces as an
//! unsupported-language error rather than being stored as free text.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::error::WorkflowError;
use crate::language::Language;
use crate::llm::LLMProvider;
use crate::prompts::RolePrompts;
use crate::state::{Message, PipelineState, StateUpdate};

use super::PipelineNode;

pub struct LanguageSelector {
    provider: Arc<dyn LLMProvider>,
}

impl LanguageSelector {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl PipelineNode for LanguageSelector {
    fn name(&self) -> &'static str {
        "decide_language"
    }

    async fn run(&self, state: &PipelineState) -> Result<StateUpdate, WorkflowError> {
        let mut request = Vec::with_capacity(state.messages.len() + 2);
        request.push(Message::system(RolePrompts::language_decider()));
        request.extend(state.messages.iter().cloned());
        request.push(Message::human(RolePrompts::language_choice_instruction()));

        let response = self.provider.complete(&request).await?;
        let reply = response.content().to_lowercase();

        let language = Language::parse(&reply)
            .ok_or_else(|| WorkflowError::UnsupportedLanguage(reply.trim().to_string()))?;
        info!(%language, "language selected");

        Ok(StateUpdate {
            language: Some(language),
            ..Default::default()
        })
    }
}
