//! Checking and testing passthrough nodes
//!
//! `checking` and `testing` are valid supervisor decisions, so the graph
//! must have an edge for them. No review or testing role is wired in yet;
//! these nodes log, leave a trace in the conversation, and hand control
//! straight back to the supervisor. `review` and `test_results` stay unset.

use async_trait::async_trait;
use tracing::info;

use crate::error::WorkflowError;
use crate::state::{Message, PipelineState, StateUpdate};

use super::PipelineNode;

pub struct CheckingNode;

#[async_trait]
impl PipelineNode for CheckingNode {
    fn name(&self) -> &'static str {
        "checking"
    }

    async fn run(&self, _state: &PipelineState) -> Result<StateUpdate, WorkflowError> {
        info!("checking stage has no reviewer wired in; returning to supervisor");
        Ok(StateUpdate::empty().with_message(Message::system(
            "No checking agent is available; skipping review.",
        )))
    }
}

pub struct TestingNode;

#[async_trait]
impl PipelineNode for TestingNode {
    fn name(&self) -> &'static str {
        "testing"
    }

    async fn run(&self, _state: &PipelineState) -> Result<StateUpdate, WorkflowError> {
        info!("testing stage has no test runner wired in; returning to supervisor");
        Ok(StateUpdate::empty().with_message(Message::system(
            "No testing agent is available; skipping tests.",
        )))
    }
}
