//! Error types for the coding workflow
//!
//! Three layers, mirroring where failures can occur:
//! - [`LlmError`]: the model invocation boundary
//! - [`WorkflowBuildError`]: graph construction (compile-time for the pipeline)
//! - [`WorkflowError`]: execution of a run

use thiserror::Error;

/// Errors from the model invocation boundary.
#[derive(Debug, Error, Clone)]
pub enum LlmError {
    /// The provider was never usable: credential or client construction
    /// failed at startup and the lazy-failing stand-in was installed.
    /// Raised only when the stand-in is actually invoked.
    #[error("LLM provider unavailable: {0}")]
    Unavailable(String),

    /// Provider configuration problem detected at construction time.
    #[error("LLM configuration error: {0}")]
    Config(String),

    /// The completion call itself failed.
    #[error("LLM completion failed: {0}")]
    Completion(String),
}

/// Errors raised while building a workflow graph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowBuildError {
    #[error("workflow entry point not set")]
    NoEntryPoint,

    #[error("unknown node id: {0}")]
    UnknownNode(String),

    /// A conditional router declared a target that is neither a node nor END.
    #[error("router on '{from}' declares unknown target '{target}'")]
    UnknownRouterTarget { from: String, target: String },
}

/// Errors raised while executing a workflow run.
///
/// Only the relevance gate catches [`WorkflowError::Llm`] (it fails closed);
/// every other node propagates, aborting the run with no partial-result
/// contract.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// The supervisor produced a decision outside the routing enumeration,
    /// or a router returned a target with no matching edge.
    #[error("unroutable decision '{decision}' from node '{node}'")]
    Routing { node: String, decision: String },

    /// The engine was asked to run a node it does not know.
    #[error("no node registered under '{0}'")]
    UnknownNode(String),

    /// The language selector answered outside the supported set, or the
    /// coder was dispatched on a language it has no generator for.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// The coder ran before any language was selected.
    #[error("no language selected before coding")]
    LanguageNotSelected,

    /// The supervisor dispatch counter exceeded the configured ceiling.
    #[error("iteration limit reached: attempt {attempt} of {max}")]
    IterationLimit { attempt: u32, max: u32 },
}
