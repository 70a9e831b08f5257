//! Planner
//!
//! Produces a structured implementation plan for the selected language. The
//! full reply is stored as `plan` and appended to the conversation so
//! downstream nodes see it as context. Re-running the planner overwrites the
//! plan and appends a fresh trace entry; it never clears `code`.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::error::WorkflowError;
use crate::llm::LLMProvider;
use crate::prompts::RolePrompts;
use crate::state::{Message, PipelineState, StateUpdate};

use super::PipelineNode;

pub struct Planner {
    provider: Arc<dyn LLMProvider>,
}

impl Planner {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl PipelineNode for Planner {
    fn name(&self) -> &'static str {
        "planning"
    }

    async fn run(&self, state: &PipelineState) -> Result<StateUpdate, WorkflowError> {
        let language = state.language.ok_or(WorkflowError::LanguageNotSelected)?;

        let mut request = Vec::with_capacity(state.messages.len() + 2);
        request.push(Message::system(RolePrompts::planner()));
        request.extend(state.messages.iter().cloned());
        request.push(Message::human(RolePrompts::plan_instruction(language)));

        let response = self.provider.complete(&request).await?;
        let plan = response.content().to_string();
        info!(chars = plan.len(), "plan produced");

        Ok(StateUpdate {
            plan: Some(plan.clone()),
            append_messages: vec![Message::assistant(plan)],
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;
    use crate::language::Language;
    use crate::llm::LLMResponse;

    struct FixedProvider(&'static str);

    #[async_trait]
    impl LLMProvider for FixedProvider {
        async fn complete(&self, messages: &[Message]) -> Result<LLMResponse, LlmError> {
            assert!(messages
                .iter()
                .any(|m| m.content.contains("Planning Agent")));
            Ok(LLMResponse::new(Message::assistant(self.0)))
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_plan_is_stored_and_traced() {
        let node = Planner::new(Arc::new(FixedProvider("1. Parse input\n2. Add")));
        let mut state = PipelineState::new("add two variables");
        state.language = Some(Language::Python);

        let update = node.run(&state).await.unwrap();
        assert_eq!(update.plan.as_deref(), Some("1. Parse input\n2. Add"));
        assert_eq!(update.append_messages.len(), 1);
        assert_eq!(update.append_messages[0].content, "1. Parse input\n2. Add");
    }

    #[tokio::test]
    async fn test_planner_requires_language() {
        let node = Planner::new(Arc::new(FixedProvider("plan")));
        let state = PipelineState::new("task");

        let err = node.run(&state).await.unwrap_err();
        assert!(matches!(err, WorkflowError::LanguageNotSelected));
    }
}
