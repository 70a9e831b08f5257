//! Workflow nodes
//!
//! Each node is one named step with a fixed role instruction and a defined
//! contract over the shared state: it receives a snapshot of
//! [`PipelineState`](crate::state::PipelineState) and returns a
//! [`StateUpdate`](crate::state::StateUpdate) overlay. Nodes hold their
//! injected provider explicitly; there is no ambient global client.

pub mod coder;
pub mod decide_language;
pub mod planner;
pub mod relevance;
pub mod review;
pub mod supervisor;

pub use coder::Coder;
pub use decide_language::LanguageSelector;
pub use planner::Planner;
pub use relevance::RelevanceGate;
pub use review::{CheckingNode, TestingNode};
pub use supervisor::Supervisor;

use async_trait::async_trait;

use crate::error::WorkflowError;
use crate::state::{PipelineState, StateUpdate};

/// A single step in the workflow graph.
#[async_trait]
pub trait PipelineNode: Send + Sync {
    /// Node id, as registered in the graph.
    fn name(&self) -> &'static str;

    /// Execute the step against a snapshot of the state.
    ///
    /// Failures propagate and abort the run unless the node documents
    /// otherwise (only the relevance gate fails closed).
    async fn run(&self, state: &PipelineState) -> Result<StateUpdate, WorkflowError>;
}
