//! Relevance gate
//!
//! Single-shot classifier deciding whether the pipeline should run at all.
//! The only node that catches provider errors: on any invocation failure it
//! logs and fails closed to `not_relevant` instead of aborting the run.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::WorkflowError;
use crate::llm::LLMProvider;
use crate::prompts::RolePrompts;
use crate::state::{Message, PipelineState, Relevance, StateUpdate};

use super::PipelineNode;

pub struct RelevanceGate {
    provider: Arc<dyn LLMProvider>,
}

impl RelevanceGate {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl PipelineNode for RelevanceGate {
    fn name(&self) -> &'static str {
        "relevance"
    }

    async fn run(&self, state: &PipelineState) -> Result<StateUpdate, WorkflowError> {
        // Single-turn: the classification prompt stands alone, outside the
        // shared conversation.
        let request = vec![Message::human(RolePrompts::relevance(&state.task))];

        let relevance = match self.provider.complete(&request).await {
            Ok(response) => {
                let verdict = Relevance::from_reply(response.content());
                info!(reply = %response.content().trim(), ?verdict, "relevance check");
                verdict
            }
            Err(err) => {
                warn!(%err, "relevance check failed; failing closed to not_relevant");
                Relevance::NotRelevant
            }
        };

        Ok(StateUpdate {
            relevance: Some(relevance),
            ..Default::default()
        })
    }
}
