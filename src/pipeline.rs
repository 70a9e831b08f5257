//! The coding pipeline wiring
//!
//! Assembles the concrete graph: relevance gate in front, supervisor in the
//! middle dispatching to the worker nodes, every worker returning to the
//! supervisor, and `END` reachable from the gate (not relevant) or the
//! supervisor (complete).

use std::sync::Arc;

use crate::error::WorkflowBuildError;
use crate::llm::LLMProvider;
use crate::nodes::{
    CheckingNode, Coder, LanguageSelector, Planner, RelevanceGate, Supervisor, TestingNode,
};
use crate::state::Relevance;
use crate::workflow::{CompiledPipeline, PipelineGraph, END};

/// Build the full coding workflow over the given provider.
///
/// The provider is constructed once by the caller and injected into every
/// node; nothing here reaches for ambient globals.
pub fn coding_pipeline(
    provider: Arc<dyn LLMProvider>,
    max_iterations: u32,
) -> Result<CompiledPipeline, WorkflowBuildError> {
    PipelineGraph::new()
        .name("coding_crew")
        .node("relevance", Arc::new(RelevanceGate::new(provider.clone())))
        .node("supervisor", Arc::new(Supervisor::new(provider.clone(), max_iterations)))
        .node("decide_language", Arc::new(LanguageSelector::new(provider.clone())))
        .node("planning", Arc::new(Planner::new(provider.clone())))
        .node("coding", Arc::new(Coder::new(provider)))
        .node("checking", Arc::new(CheckingNode))
        .node("testing", Arc::new(TestingNode))
        .entry("relevance")
        // Irrelevant tasks terminate immediately, bypassing every other node.
        .conditional_edges(
            "relevance",
            |state| {
                if state.relevance == Relevance::Relevant {
                    "supervisor".to_string()
                } else {
                    END.to_string()
                }
            },
            vec!["supervisor", END],
        )
        // The supervisor's decision selects the next worker, or END.
        .conditional_edges(
            "supervisor",
            |state| match state.next {
                Some(step) => step.target().to_string(),
                None => "<unset>".to_string(),
            },
            vec!["decide_language", "planning", "coding", "checking", "testing", END],
        )
        // Every worker hands control back to the supervisor.
        .edge("decide_language", "supervisor")
        .edge("planning", "supervisor")
        .edge("coding", "supervisor")
        .edge("checking", "supervisor")
        .edge("testing", "supervisor")
        .max_iterations(max_iterations)
        .build()
}
