//! Shared pipeline state
//!
//! The single record threaded through every node of the workflow. Nodes never
//! mutate the record in place: each returns a [`StateUpdate`] overlay and the
//! engine produces the next state via [`PipelineState::apply_update`]. The
//! overlay can only append to `messages`, which makes the append-only
//! invariant structural rather than a convention.

use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Message role in the conversation history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Human,
    Assistant,
}

/// A single role-tagged entry in the conversation history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self { role: Role::Human, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Result of the relevance classification.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Relevance {
    Relevant,
    NotRelevant,
    #[default]
    Unset,
}

impl Relevance {
    /// Interpret the gate's literal reply. Only the exact token `relevant`
    /// counts; any other answer fails closed.
    pub fn from_reply(reply: &str) -> Self {
        if reply.trim() == "relevant" {
            Relevance::Relevant
        } else {
            Relevance::NotRelevant
        }
    }
}

/// The supervisor's routing decision, validated against this closed
/// enumeration. The model's raw reply never travels through the engine as a
/// string; unrecognized replies are rejected at the supervisor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NextStep {
    DecideLanguage,
    Planning,
    Coding,
    Checking,
    Testing,
    Complete,
}

impl NextStep {
    /// Parse a lower-cased decision token.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().trim_matches(|c: char| c == '"' || c == '.') {
            "decide_language" => Some(NextStep::DecideLanguage),
            "planning" => Some(NextStep::Planning),
            "coding" => Some(NextStep::Coding),
            "checking" => Some(NextStep::Checking),
            "testing" => Some(NextStep::Testing),
            "complete" => Some(NextStep::Complete),
            _ => None,
        }
    }

    /// Node id this decision routes to, or [`crate::workflow::END`].
    pub fn target(&self) -> &'static str {
        match self {
            NextStep::DecideLanguage => "decide_language",
            NextStep::Planning => "planning",
            NextStep::Coding => "coding",
            NextStep::Checking => "checking",
            NextStep::Testing => "testing",
            NextStep::Complete => crate::workflow::END,
        }
    }
}

/// The shared state record carried through every workflow step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineState {
    /// Full conversational context, append-only within a run.
    pub messages: Vec<Message>,

    /// Original natural-language request; immutable once set.
    pub task: String,

    /// Relevance gate verdict.
    pub relevance: Relevance,

    /// Selected implementation language; `None` until the selector runs.
    pub language: Option<Language>,

    /// Planner output.
    pub plan: Option<String>,

    /// Coder output (raw model text, possibly multiple fenced files).
    pub code: Option<String>,

    /// Reserved for a review role; never populated by any wired node.
    pub review: Option<String>,

    /// Reserved for a testing role; never populated by any wired node.
    pub test_results: Option<String>,

    /// Supervisor dispatch counter, starts at 1.
    pub attempt: u32,

    /// Routing directive set by the supervisor.
    pub next: Option<NextStep>,
}

impl PipelineState {
    /// Create the initial state for a run: the task, a single human message
    /// carrying it, and `attempt = 1`.
    pub fn new(task: impl Into<String>) -> Self {
        let task = task.into();
        Self {
            messages: vec![Message::human(&task)],
            task,
            relevance: Relevance::Unset,
            language: None,
            plan: None,
            code: None,
            review: None,
            test_results: None,
            attempt: 1,
            next: None,
        }
    }

    /// Apply an overlay, producing the next state. Pure function: the
    /// original record is not modified.
    pub fn apply_update(&self, update: StateUpdate) -> Self {
        let mut next = self.clone();
        next.messages.extend(update.append_messages);
        if let Some(relevance) = update.relevance {
            next.relevance = relevance;
        }
        if let Some(language) = update.language {
            next.language = Some(language);
        }
        if let Some(plan) = update.plan {
            next.plan = Some(plan);
        }
        if let Some(code) = update.code {
            next.code = Some(code);
        }
        if let Some(attempt) = update.attempt {
            next.attempt = attempt;
        }
        if let Some(step) = update.next {
            next.next = Some(step);
        }
        next
    }
}

/// Overlay returned by a node. Unset fields leave the state untouched;
/// `append_messages` extends the history and can never rewrite it.
#[derive(Debug, Clone, Default)]
pub struct StateUpdate {
    pub append_messages: Vec<Message>,
    pub relevance: Option<Relevance>,
    pub language: Option<Language>,
    pub plan: Option<String>,
    pub code: Option<String>,
    pub attempt: Option<u32>,
    pub next: Option<NextStep>,
}

impl StateUpdate {
    /// An overlay that changes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.append_messages.push(message);
        self
    }

    pub fn with_next(mut self, step: NextStep) -> Self {
        self.next = Some(step);
        self
    }
}
