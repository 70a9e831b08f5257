//! Workflow graph builder and sequential engine
//!
//! A fluent builder for defining nodes, direct edges, and conditional edges,
//! validated into a [`CompiledPipeline`] that executes one node at a time.
//! Conditional edges compute their destination at runtime from the state
//! record; every destination a router can produce must be declared at build
//! time, so an out-of-enumeration decision is caught as a routing error
//! instead of leaving the engine without a transition.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::MAX_ITERATIONS;
use crate::error::{WorkflowBuildError, WorkflowError};
use crate::nodes::PipelineNode;
use crate::state::PipelineState;

/// Sentinel target for terminal edges.
pub const END: &str = "END";

/// Runtime routing decision over the state record.
pub type Router = Box<dyn Fn(&PipelineState) -> String + Send + Sync>;

enum Edge {
    /// Fixed destination.
    Direct(String),
    /// Destination computed from the state; `targets` is the closed set of
    /// destinations the router may produce.
    Conditional { router: Router, targets: Vec<String> },
}

/// Builder for workflow graphs.
pub struct PipelineGraph {
    name: String,
    nodes: HashMap<String, Arc<dyn PipelineNode>>,
    edges: HashMap<String, Edge>,
    entry: Option<String>,
    max_iterations: u32,
}

impl Default for PipelineGraph {
    fn default() -> Self {
        Self {
            name: String::new(),
            nodes: HashMap::new(),
            edges: HashMap::new(),
            entry: None,
            max_iterations: MAX_ITERATIONS,
        }
    }
}

impl PipelineGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the workflow name (used in logs).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Register a node.
    pub fn node(mut self, id: impl Into<String>, node: Arc<dyn PipelineNode>) -> Self {
        self.nodes.insert(id.into(), node);
        self
    }

    /// Set the entry point.
    pub fn entry(mut self, id: impl Into<String>) -> Self {
        self.entry = Some(id.into());
        self
    }

    /// Add a direct edge. `END` is a valid destination.
    pub fn edge(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.edges.insert(from.into(), Edge::Direct(to.into()));
        self
    }

    /// Add conditional edges: the router inspects the state and returns one
    /// of the declared targets.
    pub fn conditional_edges(
        mut self,
        from: impl Into<String>,
        router: impl Fn(&PipelineState) -> String + Send + Sync + 'static,
        targets: Vec<&str>,
    ) -> Self {
        self.edges.insert(
            from.into(),
            Edge::Conditional {
                router: Box::new(router),
                targets: targets.into_iter().map(String::from).collect(),
            },
        );
        self
    }

    /// Set the ceiling on supervisor dispatch cycles.
    pub fn max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Validate the graph: the entry point and every edge endpoint must name
    /// a registered node (or `END`).
    pub fn build(self) -> Result<CompiledPipeline, WorkflowBuildError> {
        let entry = self.entry.ok_or(WorkflowBuildError::NoEntryPoint)?;
        if !self.nodes.contains_key(&entry) {
            return Err(WorkflowBuildError::UnknownNode(entry));
        }

        for (from, edge) in &self.edges {
            if !self.nodes.contains_key(from) {
                return Err(WorkflowBuildError::UnknownNode(from.clone()));
            }
            match edge {
                Edge::Direct(to) => {
                    if to != END && !self.nodes.contains_key(to) {
                        return Err(WorkflowBuildError::UnknownNode(to.clone()));
                    }
                }
                Edge::Conditional { targets, .. } => {
                    for target in targets {
                        if target != END && !self.nodes.contains_key(target) {
                            return Err(WorkflowBuildError::UnknownRouterTarget {
                                from: from.clone(),
                                target: target.clone(),
                            });
                        }
                    }
                }
            }
        }

        Ok(CompiledPipeline {
            name: self.name,
            nodes: self.nodes,
            edges: self.edges,
            entry,
            max_iterations: self.max_iterations,
        })
    }
}

/// A validated, executable workflow.
pub struct CompiledPipeline {
    name: String,
    nodes: HashMap<String, Arc<dyn PipelineNode>>,
    edges: HashMap<String, Edge>,
    entry: String,
    max_iterations: u32,
}

impl CompiledPipeline {
    /// Execute the workflow to completion.
    ///
    /// Strictly sequential: one node runs at a time, its overlay is applied,
    /// and the next destination is computed before anything else happens.
    /// The state record is never aliased: each node sees a snapshot.
    pub async fn run(&self, initial: PipelineState) -> Result<PipelineState, WorkflowError> {
        let mut state = initial;
        let mut current = self.entry.clone();
        info!(workflow = %self.name, entry = %current, "starting workflow run");

        loop {
            let node = self
                .nodes
                .get(&current)
                .ok_or_else(|| WorkflowError::UnknownNode(current.clone()))?;

            debug!(node = %current, attempt = state.attempt, "running node");
            let update = node.run(&state).await?;
            state = state.apply_update(update);

            let next = match self.edges.get(&current) {
                Some(Edge::Direct(to)) => to.clone(),
                Some(Edge::Conditional { router, targets }) => {
                    let target = router(&state);
                    if !targets.contains(&target) {
                        return Err(WorkflowError::Routing {
                            node: current,
                            decision: target,
                        });
                    }
                    target
                }
                // A node with no outgoing edge is a wiring hole, not a
                // terminal: refuse to guess.
                None => {
                    return Err(WorkflowError::Routing {
                        node: current,
                        decision: "<no edge>".to_string(),
                    })
                }
            };

            if next == END {
                info!(workflow = %self.name, attempt = state.attempt, "workflow complete");
                return Ok(state);
            }

            if state.attempt > self.max_iterations {
                return Err(WorkflowError::IterationLimit {
                    attempt: state.attempt,
                    max: self.max_iterations,
                });
            }

            current = next;
        }
    }
}
