//! Coder
//!
//! Generates source text implementing the plan. Dispatch is a closed match
//! over [`Language`]: Python and JavaScript bind their own generator
//! instructions; the remaining choices have no generator wired in and
//! surface an unsupported-language error instead of silently falling back.
//!
//! The coding instruction fixes the multi-file output convention: each file
//! wrapped in a fenced block whose first line is a `FILENAME:` comment in
//! the file's own comment syntax.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::error::WorkflowError;
use crate::language::Language;
use crate::llm::LLMProvider;
use crate::prompts::RolePrompts;
use crate::state::{Message, PipelineState, StateUpdate};

use super::PipelineNode;

pub struct Coder {
    provider: Arc<dyn LLMProvider>,
}

impl Coder {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self { provider }
    }

    /// Generator instruction for a language, or an error when no generator
    /// exists for it.
    fn generator_prompt(language: Language) -> Result<&'static str, WorkflowError> {
        match language {
            Language::Python => Ok(RolePrompts::python_coder()),
            Language::JavaScript => Ok(RolePrompts::javascript_coder()),
            Language::Cpp | Language::HtmlCss => Err(WorkflowError::UnsupportedLanguage(
                language.as_str().to_string(),
            )),
        }
    }
}

#[async_trait]
impl PipelineNode for Coder {
    fn name(&self) -> &'static str {
        "coding"
    }

    async fn run(&self, state: &PipelineState) -> Result<StateUpdate, WorkflowError> {
        let language = state.language.ok_or(WorkflowError::LanguageNotSelected)?;
        let system_prompt = Self::generator_prompt(language)?;
        let plan = state.plan.as_deref().unwrap_or_default();

        let language_note = Message::system(format!(
            "The system has selected {language} as the most appropriate language for this task."
        ));

        let mut request = Vec::with_capacity(state.messages.len() + 3);
        request.push(Message::system(system_prompt));
        request.extend(state.messages.iter().cloned());
        request.push(language_note.clone());
        request.push(Message::human(RolePrompts::coding_instruction(plan, language)));

        let response = self.provider.complete(&request).await?;
        let code = response.content().to_string();
        info!(%language, chars = code.len(), "code produced");

        Ok(StateUpdate {
            code: Some(code.clone()),
            append_messages: vec![language_note, Message::assistant(code)],
            ..Default::default()
        })
    }
}
