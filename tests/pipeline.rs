//! End-to-end pipeline tests over a scripted provider
//!
//! These tests drive the full compiled workflow with canned model replies,
//! covering the routing behavior the pipeline guarantees: immediate
//! termination for irrelevant tasks, the forced language-selection step,
//! replanning semantics, the passthrough stages, decision validation, and
//! the iteration ceiling.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use coding_crew::{
    coding_pipeline, Language, LLMProvider, LLMResponse, LlmError, Message, PipelineState,
    Relevance, Role, WorkflowError,
};

/// Replies from a fixed script, in invocation order. Records every request
/// so tests can assert on prompt composition and call order.
struct ScriptedProvider {
    replies: Mutex<VecDeque<&'static str>>,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedProvider {
    fn new(replies: &[&'static str]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.iter().copied().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn request(&self, index: usize) -> Vec<Message> {
        self.requests.lock().unwrap()[index].clone()
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn complete(&self, messages: &[Message]) -> Result<LLMResponse, LlmError> {
        self.requests.lock().unwrap().push(messages.to_vec());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LlmError::Completion("script exhausted".into()))?;
        Ok(LLMResponse::new(Message::assistant(reply)))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Replies chosen from the latest human message, for runs whose length is
/// not fixed up front.
struct RoleAwareProvider {
    supervisor_decision: &'static str,
}

#[async_trait]
impl LLMProvider for RoleAwareProvider {
    async fn complete(&self, messages: &[Message]) -> Result<LLMResponse, LlmError> {
        let prompt = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Human)
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        let reply = if prompt.contains("related to code generation") {
            "relevant"
        } else if prompt.contains("which programming language") {
            "Python"
        } else if prompt.contains("decide which agent should work next") {
            self.supervisor_decision
        } else if prompt.contains("create a detailed plan") {
            "1. add the numbers"
        } else {
            "print(a + b)"
        };
        Ok(LLMResponse::new(Message::assistant(reply)))
    }

    fn name(&self) -> &str {
        "role-aware"
    }
}

#[tokio::test]
async fn irrelevant_task_terminates_immediately() {
    let provider = ScriptedProvider::new(&["not_relevant"]);
    let pipeline = coding_pipeline(provider.clone(), 10).unwrap();

    let final_state = pipeline
        .run(PipelineState::new("What's the capital of France?"))
        .await
        .unwrap();

    assert_eq!(final_state.relevance, Relevance::NotRelevant);
    assert!(final_state.plan.is_none());
    assert!(final_state.code.is_none());
    assert!(final_state.language.is_none());
    // Only the relevance check ran
    assert_eq!(provider.calls(), 1);
    assert_eq!(final_state.attempt, 1);
}

#[tokio::test]
async fn add_two_variables_happy_path() {
    // relevance, language choice, then supervisor/worker alternation
    let provider = ScriptedProvider::new(&[
        "relevant",
        "JavaScript",
        "planning",
        "1. declare a and b\n2. log a + b",
        "coding",
        "// FILENAME: add.js\nconst sum = a + b;",
        "complete",
    ]);
    let pipeline = coding_pipeline(provider.clone(), 10).unwrap();

    let task = "Write me a Javascript code to add two variables";
    let final_state = pipeline.run(PipelineState::new(task)).await.unwrap();

    assert_eq!(final_state.relevance, Relevance::Relevant);
    assert_eq!(final_state.language, Some(Language::JavaScript));
    assert_eq!(
        final_state.plan.as_deref(),
        Some("1. declare a and b\n2. log a + b")
    );
    assert!(final_state.code.unwrap().contains("FILENAME: add.js"));

    // The supervisor's first rule forced decide_language before any other
    // routing: the second model call is the language choice, not a
    // supervisor decision.
    let second = provider.request(1);
    assert!(second
        .iter()
        .any(|m| m.content.contains("which programming language")));

    // Supervisor ran 4 times (one forced, three model-delegated)
    assert_eq!(final_state.attempt, 5);

    // The conversation carries the full trace: task, decisions, plan,
    // language note, code.
    assert_eq!(final_state.messages[0].content, task);
    assert!(final_state.messages.len() > 5);
}

#[tokio::test]
async fn messages_grow_monotonically() {
    let provider = ScriptedProvider::new(&[
        "relevant",
        "Python",
        "planning",
        "plan v1",
        "complete",
    ]);
    let pipeline = coding_pipeline(provider, 10).unwrap();

    let initial = PipelineState::new("Write a fizzbuzz");
    let initial_len = initial.messages.len();
    let final_state = pipeline.run(initial).await.unwrap();

    assert!(final_state.messages.len() >= initial_len);
    // The original task entry is still the untouched prefix
    assert_eq!(final_state.messages[0].content, "Write a fizzbuzz");
}

#[tokio::test]
async fn replanning_overwrites_plan_but_keeps_code() {
    let provider = ScriptedProvider::new(&[
        "relevant",
        "Python",
        "planning",
        "plan v1",
        "coding",
        "print('v1')",
        "planning",
        "plan v2",
        "complete",
    ]);
    let pipeline = coding_pipeline(provider, 10).unwrap();

    let final_state = pipeline
        .run(PipelineState::new("Write a greeting script"))
        .await
        .unwrap();

    assert_eq!(final_state.plan.as_deref(), Some("plan v2"));
    assert_eq!(final_state.code.as_deref(), Some("print('v1')"));
    // Both plans appear in the conversational trace
    let contents: Vec<&str> = final_state
        .messages
        .iter()
        .map(|m| m.content.as_str())
        .collect();
    assert!(contents.contains(&"plan v1"));
    assert!(contents.contains(&"plan v2"));
}

#[tokio::test]
async fn checking_and_testing_are_routable_passthroughs() {
    let provider = ScriptedProvider::new(&[
        "relevant",
        "Python",
        "checking",
        "testing",
        "complete",
    ]);
    let pipeline = coding_pipeline(provider, 10).unwrap();

    let final_state = pipeline
        .run(PipelineState::new("Write a parser"))
        .await
        .unwrap();

    // Both stages ran and returned to the supervisor without populating the
    // reserved fields.
    assert!(final_state.review.is_none());
    assert!(final_state.test_results.is_none());
    let contents: Vec<&str> = final_state
        .messages
        .iter()
        .map(|m| m.content.as_str())
        .collect();
    assert!(contents.iter().any(|c| c.contains("No checking agent")));
    assert!(contents.iter().any(|c| c.contains("No testing agent")));
}

#[tokio::test]
async fn unrecognized_supervisor_decision_aborts_the_run() {
    let provider = ScriptedProvider::new(&["relevant", "Python", "refactoring"]);
    let pipeline = coding_pipeline(provider, 10).unwrap();

    let err = pipeline
        .run(PipelineState::new("Write a parser"))
        .await
        .unwrap_err();

    match err {
        WorkflowError::Routing { node, decision } => {
            assert_eq!(node, "supervisor");
            assert_eq!(decision, "refactoring");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unsupported_language_choice_aborts_the_run() {
    let provider = ScriptedProvider::new(&["relevant", "Rust"]);
    let pipeline = coding_pipeline(provider, 10).unwrap();

    let err = pipeline
        .run(PipelineState::new("Write a CLI"))
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::UnsupportedLanguage(_)));
}

#[tokio::test]
async fn iteration_ceiling_stops_an_indecisive_supervisor() {
    // The supervisor keeps choosing planning forever.
    let provider = Arc::new(RoleAwareProvider {
        supervisor_decision: "planning",
    });
    let pipeline = coding_pipeline(provider, 4).unwrap();

    let err = pipeline
        .run(PipelineState::new("Write something"))
        .await
        .unwrap_err();

    match err {
        WorkflowError::IterationLimit { attempt, max } => {
            assert_eq!(max, 4);
            assert!(attempt > max);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn provider_failure_outside_the_gate_propagates() {
    // Script runs dry right when the planner asks for a completion.
    let provider = ScriptedProvider::new(&["relevant", "Python", "planning"]);
    let pipeline = coding_pipeline(provider, 10).unwrap();

    let err = pipeline
        .run(PipelineState::new("Write a parser"))
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::Llm(LlmError::Completion(_))));
}
