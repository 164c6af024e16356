//! Progress notification port
//!
//! Defines the interface for reporting progress while a request runs
//! through the workflow.

use atlas_domain::{AgentKind, RoutingDecision, WorkflowStep};

/// Callback for progress updates during a workflow run
///
/// Implementations live in the presentation layer.
pub trait ProgressNotifier: Send + Sync {
    /// Called when a concurrent group starts
    fn on_group_start(&self, index: usize, agents: &[AgentKind]);

    /// Called when one agent of the current group finishes
    fn on_agent_complete(&self, kind: AgentKind, success: bool);

    /// Called when every agent of the group has finished
    fn on_group_complete(&self, index: usize);

    /// Called after every workflow node
    fn on_step(&self, _step: &WorkflowStep) {}

    /// Called once the coordinator has decided
    fn on_routing(&self, _decision: &RoutingDecision) {}

    /// Called when the executor falls back to the planner or the emergency plan
    fn on_fallback(&self, _reason: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_group_start(&self, _index: usize, _agents: &[AgentKind]) {}
    fn on_agent_complete(&self, _kind: AgentKind, _success: bool) {}
    fn on_group_complete(&self, _index: usize) {}
}
