//! Execution parameters for the workflow use cases.

use atlas_domain::{AdvisorPlacement, WorkflowPolicy};
use serde::{Deserialize, Serialize};

/// Static parameters controlling routing, agents and the loop policy.
///
/// | Field | Used by |
/// |-------|---------|
/// | `advisor_placement` | Coordinator |
/// | `synthesis_temperature` | Planner plan synthesis |
/// | `event_window_days` | Planner calendar analysis, session start |
/// | `policy`, `max_iterations` | Orchestrator |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    pub advisor_placement: AdvisorPlacement,
    pub synthesis_temperature: f32,
    pub event_window_days: u32,
    pub policy: WorkflowPolicy,
    /// Upper bound on coordinator passes when the policy loops
    pub max_iterations: usize,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            advisor_placement: AdvisorPlacement::default(),
            synthesis_temperature: 0.5,
            event_window_days: 7,
            policy: WorkflowPolicy::default(),
            max_iterations: 3,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_advisor_placement(mut self, placement: AdvisorPlacement) -> Self {
        self.advisor_placement = placement;
        self
    }

    pub fn with_synthesis_temperature(mut self, temperature: f32) -> Self {
        self.synthesis_temperature = temperature;
        self
    }

    pub fn with_event_window_days(mut self, days: u32) -> Self {
        self.event_window_days = days;
        self
    }

    pub fn with_policy(mut self, policy: WorkflowPolicy, max_iterations: usize) -> Self {
        self.policy = policy;
        self.max_iterations = max_iterations;
        self
    }
}
