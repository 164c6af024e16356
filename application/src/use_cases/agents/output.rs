//! Agent output value objects

use atlas_domain::state::document::{nested, single};
use atlas_domain::{AgentKind, Document};
use serde_json::{Value, json};

/// Plan text used when every agent and the last-resort planner failed
pub const EMERGENCY_PLAN: &str = "Emergency fallback plan: Please try again or contact support.";

/// Result of one agent invocation
///
/// Holds only the deltas the agent's own stages produced, never the input
/// state's `results`.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentOutput {
    kind: AgentKind,
    results: Document,
}

impl AgentOutput {
    pub fn new(kind: AgentKind, results: Document) -> Self {
        Self { kind, results }
    }

    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    pub fn results(&self) -> &Document {
        &self.results
    }

    /// `{ "<lowercase id>": results }`, ready to merge into `agent_outputs`
    pub fn into_entry(self) -> Document {
        single(self.kind.output_key(), Value::Object(self.results))
    }
}

/// The synthetic `agent_outputs` returned when nothing else succeeded
pub fn emergency_outputs() -> Document {
    nested(AgentKind::Planner.output_key(), "plan", json!(EMERGENCY_PLAN))
}
