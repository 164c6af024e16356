//! Loop-back policy for the orchestration graph.
//!
//! After the executor node the orchestrator asks its [`LoopPolicy`] whether
//! to return to the coordinator. The default ends after one pass.

use crate::state::entities::AcademicState;
use serde::{Deserialize, Serialize};

/// Decides whether another coordinator pass follows the executor
pub trait LoopPolicy: Send + Sync {
    fn name(&self) -> &'static str;

    /// `completed` is the number of finished passes (at least 1)
    fn should_continue(&self, state: &AcademicState, completed: usize) -> bool;
}

/// Always end after the executor
#[derive(Debug, Clone, Copy, Default)]
pub struct SinglePass;

impl LoopPolicy for SinglePass {
    fn name(&self) -> &'static str {
        "single_pass"
    }

    fn should_continue(&self, _state: &AcademicState, _completed: usize) -> bool {
        false
    }
}

/// Re-coordinate while a required agent has produced no non-empty output,
/// for at most `max_iterations` passes in total
#[derive(Debug, Clone, Copy)]
pub struct UntilRequiredSatisfied {
    pub max_iterations: usize,
}

impl LoopPolicy for UntilRequiredSatisfied {
    fn name(&self) -> &'static str {
        "until_satisfied"
    }

    fn should_continue(&self, state: &AcademicState, completed: usize) -> bool {
        if completed >= self.max_iterations {
            return false;
        }
        let Some(decision) = state.routing_decision() else {
            return false;
        };
        decision
            .dispatch_targets()
            .into_iter()
            .any(|kind| !state.has_output_for(kind))
    }
}

/// Configured policy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPolicy {
    #[default]
    SinglePass,
    UntilSatisfied,
}

impl WorkflowPolicy {
    pub fn into_policy(self, max_iterations: usize) -> Box<dyn LoopPolicy> {
        match self {
            WorkflowPolicy::SinglePass => Box::new(SinglePass),
            WorkflowPolicy::UntilSatisfied => Box::new(UntilRequiredSatisfied { max_iterations }),
        }
    }
}

impl std::str::FromStr for WorkflowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "single_pass" | "single" => Ok(Self::SinglePass),
            "until_satisfied" | "loop" => Ok(Self::UntilSatisfied),
            other => Err(format!("unknown workflow policy: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{AgentKind, RoutingDecision};
    use crate::state::document::single;
    use crate::state::entities::{AGENT_OUTPUTS_KEY, COORDINATOR_ANALYSIS_KEY};
    use serde_json::{Value, json};

    fn state_with(decision: &RoutingDecision, outputs: Value) -> AcademicState {
        AcademicState::default()
            .with_results(single(
                COORDINATOR_ANALYSIS_KEY,
                Value::Object(decision.to_analysis(None)),
            ))
            .with_results(single(AGENT_OUTPUTS_KEY, outputs))
    }

    #[test]
    fn test_single_pass_never_continues() {
        assert!(!SinglePass.should_continue(&AcademicState::default(), 1));
    }

    #[test]
    fn test_until_satisfied_loops_while_output_missing() {
        let mut decision = RoutingDecision::default();
        decision.require(AgentKind::NoteWriter, 2);
        let state = state_with(&decision, json!({"planner": {"final_plan": {"plan": "p"}}}));
        let policy = UntilRequiredSatisfied { max_iterations: 3 };
        assert!(policy.should_continue(&state, 1));
        assert!(policy.should_continue(&state, 2));
        assert!(!policy.should_continue(&state, 3));
    }

    #[test]
    fn test_until_satisfied_stops_when_all_present() {
        let state = state_with(
            &RoutingDecision::default(),
            json!({"planner": {"final_plan": {"plan": "p"}}}),
        );
        assert!(!UntilRequiredSatisfied { max_iterations: 3 }.should_continue(&state, 1));
    }

    #[test]
    fn test_policy_selector() {
        assert_eq!(WorkflowPolicy::default().into_policy(3).name(), "single_pass");
        assert_eq!(
            "until-satisfied".parse::<WorkflowPolicy>().unwrap().into_policy(3).name(),
            "until_satisfied"
        );
    }
}
