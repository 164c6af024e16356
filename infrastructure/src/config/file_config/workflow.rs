//! Orchestration settings from TOML (`[routing]`, `[agents]`, `[workflow]`)

use atlas_domain::{AdvisorPlacement, WorkflowPolicy};
use serde::{Deserialize, Serialize};

/// Raw routing configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRoutingConfig {
    /// Where ADVISOR goes when the coordinator requires it
    pub advisor_placement: AdvisorPlacement,
}

/// Raw agent configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentsConfig {
    /// Temperature of the planner's synthesis stage
    pub synthesis_temperature: f32,
    /// Days ahead of now that count as "upcoming"
    pub event_window_days: u32,
}

impl Default for FileAgentsConfig {
    fn default() -> Self {
        Self {
            synthesis_temperature: 0.5,
            event_window_days: 7,
        }
    }
}

/// Raw loop-policy configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkflowConfig {
    pub policy: WorkflowPolicy,
    /// Upper bound on coordinator passes for `until_satisfied`
    pub max_iterations: usize,
}

impl Default for FileWorkflowConfig {
    fn default() -> Self {
        Self {
            policy: WorkflowPolicy::SinglePass,
            max_iterations: 3,
        }
    }
}
