//! Workflow graph nodes and step records

use crate::routing::AgentKind;
use crate::state::document::Document;
use serde::{Deserialize, Serialize};

/// Node of the fixed orchestration graph
///
/// ```text
/// start → coordinator → context_analysis → {agent entries} → executor → end
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowNode {
    Coordinator,
    ContextAnalysis,
    /// Dispatch marker for one required agent; the executor does the running
    AgentEntry(AgentKind),
    Executor,
}

impl WorkflowNode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowNode::Coordinator => "coordinator",
            WorkflowNode::ContextAnalysis => "context_analysis",
            WorkflowNode::AgentEntry(kind) => kind.output_key(),
            WorkflowNode::Executor => "executor",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WorkflowNode::Coordinator => "Coordinating",
            WorkflowNode::ContextAnalysis => "Analyzing context",
            WorkflowNode::AgentEntry(kind) => kind.display_name(),
            WorkflowNode::Executor => "Executing agents",
        }
    }
}

impl std::fmt::Display for WorkflowNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One record of the execution stream: the node that ran and the partial
/// state it produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    /// 1-based pass over the graph
    pub iteration: usize,
    pub node: WorkflowNode,
    pub delta: Document,
}

impl WorkflowStep {
    pub fn new(iteration: usize, node: WorkflowNode, delta: Document) -> Self {
        Self {
            iteration,
            node,
            delta,
        }
    }
}
