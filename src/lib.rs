//! coding-crew: a multi-agent code generation workflow
//!
//! Routes a natural-language coding task through a sequence of specialized
//! LLM roles (relevance check, language selection, planning, coding,
//! supervision), driven by a small finite-state workflow engine.
//!
//! # Overview
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                     Coding Pipeline                        │
//! │                                                            │
//! │  ┌───────────┐   not relevant                              │
//! │  │ relevance │ ───────────────▶ END                        │
//! │  └─────┬─────┘                                             │
//! │        │ relevant                                          │
//! │        ▼                                                   │
//! │  ┌────────────┐  decide_language / planning / coding /     │
//! │  │ supervisor │─▶ checking / testing ──┐                   │
//! │  └─────▲──────┘                        │                   │
//! │        └───────────────────────────────┘                   │
//! │        │ complete                                          │
//! │        ▼                                                   │
//! │       END                                                  │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Each node receives the full [`PipelineState`], calls the model with its
//! fixed role instruction, and returns a [`StateUpdate`] overlay. The engine
//! applies the overlay and follows a direct or conditional edge to the next
//! node until it reaches the `END` sentinel.

pub mod config;
pub mod error;
pub mod language;
pub mod llm;
pub mod nodes;
pub mod pipeline;
pub mod prompts;
pub mod state;
pub mod workflow;

// Re-exports for convenience
pub use config::Config;
pub use error::{LlmError, WorkflowBuildError, WorkflowError};
pub use language::Language;
pub use llm::{build_provider, LLMProvider, LLMResponse, UnavailableProvider};
pub use nodes::PipelineNode;
pub use pipeline::coding_pipeline;
pub use state::{Message, NextStep, PipelineState, Relevance, Role, StateUpdate};
pub use workflow::{CompiledPipeline, PipelineGraph, END};
