//! Supervisor
//!
//! The routing brain. Its only hard-coded branch: when no language has been
//! selected yet, force a transition to `decide_language` without consulting
//! the model. Every other turn it summarizes the state, delegates the
//! decision to the model, and validates the reply against the [`NextStep`]
//! enumeration: an unrecognized reply is a routing error, never an
//! unroutable string handed to the engine.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::error::WorkflowError;
use crate::llm::LLMProvider;
use crate::prompts::RolePrompts;
use crate::state::{Message, NextStep, PipelineState, StateUpdate};

use super::PipelineNode;

pub struct Supervisor {
    provider: Arc<dyn LLMProvider>,
    max_iterations: u32,
}

impl Supervisor {
    pub fn new(provider: Arc<dyn LLMProvider>, max_iterations: u32) -> Self {
        Self { provider, max_iterations }
    }
}

#[async_trait]
impl PipelineNode for Supervisor {
    fn name(&self) -> &'static str {
        "supervisor"
    }

    async fn run(&self, state: &PipelineState) -> Result<StateUpdate, WorkflowError> {
        // Rule 1: a task without a selected language always goes to the
        // language selector, regardless of what the model would choose.
        if state.language.is_none() && !state.task.is_empty() {
            info!("no language selected; forcing decide_language");
            return Ok(StateUpdate {
                next: Some(NextStep::DecideLanguage),
                attempt: Some(state.attempt + 1),
                ..Default::default()
            });
        }

        let status = RolePrompts::supervisor_status(state, self.max_iterations);

        let mut request = Vec::with_capacity(state.messages.len() + 2);
        request.push(Message::system(RolePrompts::supervisor()));
        request.extend(state.messages.iter().cloned());
        request.push(Message::human(status));

        let response = self.provider.complete(&request).await?;
        let decision = response.content().to_lowercase();

        let next = NextStep::parse(&decision).ok_or_else(|| WorkflowError::Routing {
            node: self.name().to_string(),
            decision: decision.trim().to_string(),
        })?;
        info!(?next, attempt = state.attempt, "supervisor decision");

        Ok(StateUpdate {
            next: Some(next),
            attempt: Some(state.attempt + 1),
            // Conversational trace of the decision
            append_messages: vec![Message::assistant(decision.trim().to_string())],
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
    use std::sync::Mutex;

    struct RecordingProvider {
        reply: &'static str,
        seen: Mutex<Vec<Message>>,
    }

    impl RecordingProvider {
        fn new(reply: &'static str) -> Self {
            Self { reply, seen: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl LLMProvider for RecordingProvider {
        async fn complete(&self, messages: &[Message]) -> Result<LLMResponse, LlmError> {
            *self.seen.lock().unwrap() = messages.to_vec();
            Ok(LLMResponse::new(Message::assistant(self.reply)))
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    #[tokio::test]
    async fn test_forces_decide_language_without_model_call() {
        let provider = Arc::new(RecordingProvider::new("complete"));
        let node = Supervisor::new(provider.clone(), 10);
        let state = PipelineState::new("Write me a Javascript code to add two variables");

        let update = node.run(&state).await.unwrap();
        assert_eq!(update.next, Some(NextStep::DecideLanguage));
        assert_eq!(update.attempt, Some(2));
        // Rule 1 overrides any model call this turn
        assert!(provider.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delegates_decision_once_language_is_set() {
        let provider = Arc::new(RecordingProvider::new("planning"));
        let node = Supervisor::new(provider.clone(), 10);
        let mut state = PipelineState::new("task");
        state.language = Some(Language::Python);

        let update = node.run(&state).await.unwrap();
        assert_eq!(update.next, Some(NextStep::Planning));
        assert_eq!(update.append_messages.len(), 1);
        assert_eq!(update.append_messages[0].content, "planning");

        let seen = provider.seen.lock().unwrap();
        assert!(seen.iter().any(|m| m.content.contains("Supervisor Agent")));
        assert!(seen.iter().any(|m| m.content.contains("Iteration: 1/10")));
    }

    #[tokio::test]
    async fn test_decision_is_case_normalized() {
        let node = Supervisor::new(Arc::new(RecordingProvider::new("Coding")), 10);
        let mut state = PipelineState::new("task");
        state.language = Some(Language::Python);
        state.plan = Some("plan".into());

        let update = node.run(&state).await.unwrap();
        assert_eq!(update.next, Some(NextStep::Coding));
    }

    #[tokio::test]
    async fn test_unrecognized_decision_is_routing_error() {
        let node = Supervisor::new(Arc::new(RecordingProvider::new("refactoring")), 10);
        let mut state = PipelineState::new("task");
        state.language = Some(Language::Python);

        let err = node.run(&state).await.unwrap_err();
        match err {
            WorkflowError::Routing { node, decision } => {
                assert_eq!(node, "supervisor");
                assert_eq!(decision, "refactoring");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_failing_test_results_reach_the_prompt() {
        let provider = Arc::new(RecordingProvider::new("coding"));
        let node = Supervisor::new(provider.clone(), 10);
        let mut state = PipelineState::new("task");
        state.language = Some(Language::Python);
        state.test_results = Some("assertion fail in test_add".into());

        node.run(&state).await.unwrap();

        let seen = provider.seen.lock().unwrap();
        assert!(seen.iter().any(|m| m
            .content
            .contains("Test results indicate issues that need to be fixed")));
    }
}
