//! Coordinator response parsing.
//!
//! Turns the coordinator's free-form text into a [`RoutingDecision`]. Pure
//! domain logic, no I/O: the text-generation call that produced the text is
//! a separate step, so these heuristics are testable without a model.
//!
//! # Rules
//!
//! | Condition | Effect |
//! |-----------|--------|
//! | no `Thought:` or no `Decision:` marker | fallback decision, cause in `reasoning` |
//! | mentions notes (`note`, any case) | add NOTEWRITER (priority 2), first group becomes `[PLANNER, NOTEWRITER]` |
//! | mentions `Advisor`/`ADVISOR` or `guidance` (any case) | add ADVISOR (priority 3), placed per [`AdvisorPlacement`] |
//! | `Thought:` … `Action:` present | `reasoning` = trimmed text between them |
//!
//! PLANNER is always required.

use super::agent_kind::AgentKind;
use super::decision::{AdvisorPlacement, RoutingDecision};

pub const THOUGHT_MARKER: &str = "Thought:";
pub const ACTION_MARKER: &str = "Action:";
pub const DECISION_MARKER: &str = "Decision:";

const NOTE_KEYWORDS: &[&str] = &["note"];
const GUIDANCE_KEYWORDS: &[&str] = &["guidance"];
const ADVISOR_NAMES: &[&str] = &["Advisor", "ADVISOR"];

/// Parse coordinator output into a routing decision. Never panics.
pub fn parse_routing_response(response: &str, placement: AdvisorPlacement) -> RoutingDecision {
    if !is_well_formed(response) {
        return RoutingDecision::fallback(
            "malformed coordinator response (missing Thought:/Decision: markers)",
        );
    }

    let mut decision = RoutingDecision::default();
    let lower = response.to_lowercase();

    if mentions_notes(&lower) {
        decision.require(AgentKind::NoteWriter, 2);
        decision.concurrent_groups = vec![vec![AgentKind::Planner, AgentKind::NoteWriter]];
    }

    if mentions_guidance(response, &lower) {
        decision.require(AgentKind::Advisor, 3);
        if placement == AdvisorPlacement::TrailingGroup {
            decision.concurrent_groups.push(vec![AgentKind::Advisor]);
        }
    }

    if let Some(thought) = extract_thought(response) {
        decision.reasoning = thought;
    }

    decision
}

/// Both the `Thought:` and `Decision:` markers are present
pub fn is_well_formed(response: &str) -> bool {
    response.contains(THOUGHT_MARKER) && response.contains(DECISION_MARKER)
}

/// Text between the first `Thought:` and the following `Action:`, trimmed.
///
/// `None` when either marker is missing or the section is blank.
pub fn extract_thought(response: &str) -> Option<String> {
    if !response.contains(ACTION_MARKER) {
        return None;
    }
    let start = response.find(THOUGHT_MARKER)? + THOUGHT_MARKER.len();
    let after = &response[start..];
    let end = after.find(ACTION_MARKER).unwrap_or(after.len());
    let thought = after[..end].trim();
    (!thought.is_empty()).then(|| thought.to_string())
}

fn mentions_notes(lower: &str) -> bool {
    NOTE_KEYWORDS.iter().any(|k| lower.contains(k))
}

fn mentions_guidance(response: &str, lower: &str) -> bool {
    ADVISOR_NAMES.iter().any(|name| response.contains(name))
        || GUIDANCE_KEYWORDS.iter().any(|k| lower.contains(k))
}
