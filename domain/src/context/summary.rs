//! Context summary handed to the coordinator prompt

use crate::state::entities::AcademicState;
use serde::Serialize;
use serde_json::Value;

const UNKNOWN_MAJOR: &str = "Unknown";

/// Student facts relevant to routing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentSummary {
    pub major: String,
    pub year: Option<Value>,
    pub learning_style: Value,
}

/// Digest of the state used to ground the routing decision
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextSummary {
    pub student: StudentSummary,
    /// First current course whose name appears in the request
    pub course: Option<Value>,
    pub upcoming_events: usize,
    pub active_tasks: usize,
    pub study_patterns: Value,
}

impl ContextSummary {
    pub fn from_state(state: &AcademicState, request: &str) -> Self {
        let profile = state.profile();
        let personal = profile.get("personal_info");

        let major = personal
            .and_then(|p| p.get("major"))
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_MAJOR)
            .to_string();
        let year = personal
            .and_then(|p| p.get("academic_year"))
            .filter(|v| !v.is_null())
            .cloned();

        Self {
            student: StudentSummary {
                major,
                year,
                learning_style: state.learning_preference("learning_style"),
            },
            course: match_course(state, request),
            upcoming_events: state.events().len(),
            active_tasks: state.task_list().len(),
            study_patterns: state.learning_preference("study_patterns"),
        }
    }

    /// Indented JSON for prompt embedding
    pub fn to_prompt_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn match_course(state: &AcademicState, request: &str) -> Option<Value> {
    let request = request.to_lowercase();
    state
        .profile()
        .get("academic_info")
        .and_then(|a| a.get("current_courses"))
        .and_then(Value::as_array)?
        .iter()
        .find(|course| {
            course
                .get("name")
                .and_then(Value::as_str)
                .map(str::trim)
                .is_some_and(|name| !name.is_empty() && request.contains(&name.to_lowercase()))
        })
        .cloned()
}
