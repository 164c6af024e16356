//! The shared state document threaded through one request.

use super::document::{Document, merge};
use super::message::{Message, Role};
use crate::routing::{AgentKind, RoutingDecision};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key under which the executor accumulates every agent's output
pub const AGENT_OUTPUTS_KEY: &str = "agent_outputs";
/// Key under which the coordinator records its routing analysis
pub const COORDINATOR_ANALYSIS_KEY: &str = "coordinator_analysis";
/// Key under which the context-analysis node records the learner profile digest
pub const PROFILE_ANALYSIS_KEY: &str = "profile_analysis";

/// State of one request (Entity)
///
/// `profile`, `calendar` and `tasks` are read-only inputs fixed at session
/// start. `conversation` only grows. `results` is the single field mutated
/// during the pipeline, and only through [`AcademicState::merge_results`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcademicState {
    conversation: Vec<Message>,
    profile: Document,
    calendar: Document,
    tasks: Document,
    results: Document,
}

impl AcademicState {
    pub fn new(profile: Document, calendar: Document, tasks: Document) -> Self {
        Self {
            conversation: Vec::new(),
            profile,
            calendar,
            tasks,
            results: Document::new(),
        }
    }

    /// Builder form of [`AcademicState::push_message`] for a user request
    pub fn with_request(mut self, request: impl Into<String>) -> Self {
        self.push_message(Message::user(request));
        self
    }

    /// Append a message to the conversation
    pub fn push_message(&mut self, message: Message) {
        self.conversation.push(message);
    }

    pub fn conversation(&self) -> &[Message] {
        &self.conversation
    }

    pub fn profile(&self) -> &Document {
        &self.profile
    }

    pub fn calendar(&self) -> &Document {
        &self.calendar
    }

    pub fn tasks(&self) -> &Document {
        &self.tasks
    }

    pub fn results(&self) -> &Document {
        &self.results
    }

    /// Text of the most recent user message, or `""` when there is none
    pub fn latest_request(&self) -> &str {
        self.conversation
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }

    /// Apply a partial result using the recursive merge rule
    pub fn merge_results(&mut self, partial: Document) {
        merge(&mut self.results, partial);
    }

    /// Copy of this state with `partial` merged into `results`
    pub fn with_results(&self, partial: Document) -> Self {
        let mut next = self.clone();
        next.merge_results(partial);
        next
    }

    pub fn result(&self, key: &str) -> Option<&Value> {
        self.results.get(key)
    }

    /// Look up `results[outer][inner]` as a string
    pub fn result_text(&self, outer: &str, inner: &str) -> Option<&str> {
        self.results
            .get(outer)
            .and_then(|v| v.get(inner))
            .and_then(Value::as_str)
    }

    /// The merged per-agent outputs, if the executor has run
    pub fn agent_outputs(&self) -> Option<&Document> {
        self.results.get(AGENT_OUTPUTS_KEY).and_then(Value::as_object)
    }

    /// The routing decision recorded by the coordinator step, if any
    pub fn routing_decision(&self) -> Option<RoutingDecision> {
        self.results
            .get(COORDINATOR_ANALYSIS_KEY)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Whether `agent_outputs` holds a non-empty entry for `kind`
    pub fn has_output_for(&self, kind: AgentKind) -> bool {
        self.agent_outputs()
            .and_then(|outputs| outputs.get(kind.output_key()))
            .is_some_and(has_content)
    }

    /// `calendar.events`, or an empty slice when missing or malformed
    pub fn events(&self) -> &[Value] {
        array_field(&self.calendar, "events")
    }

    /// `tasks.tasks`, or an empty slice when missing or malformed
    pub fn task_list(&self) -> &[Value] {
        array_field(&self.tasks, "tasks")
    }

    /// `profile.learning_preferences.<field>` or an empty object
    pub fn learning_preference(&self, field: &str) -> Value {
        self.profile
            .get("learning_preferences")
            .and_then(|p| p.get(field))
            .cloned()
            .unwrap_or_else(|| Value::Object(Document::new()))
    }
}

fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => map.values().any(has_content),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

fn array_field<'a>(doc: &'a Document, key: &str) -> &'a [Value] {
    doc.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::document::nested;
    use serde_json::json;

    fn profile() -> Document {
        json!({
            "id": "student_123",
            "learning_preferences": {
                "learning_style": {"visual": true},
                "study_patterns": {"peak_time": "morning"}
            }
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn test_latest_request_is_last_user_message() {
        let mut state = AcademicState::default().with_request("first");
        state.push_message(Message::assistant("reply"));
        state.push_message(Message::user("second"));
        assert_eq!(state.latest_request(), "second");
        assert_eq!(state.conversation().len(), 3);
    }

    #[test]
    fn test_latest_request_empty_state() {
        assert_eq!(AcademicState::default().latest_request(), "");
    }

    #[test]
    fn test_merge_results_accumulates() {
        let mut state = AcademicState::default();
        state.merge_results(nested("calendar_analysis", "analysis", json!("a")));
        state.merge_results(nested("task_analysis", "analysis", json!("b")));
        assert_eq!(state.result_text("calendar_analysis", "analysis"), Some("a"));
        assert_eq!(state.result_text("task_analysis", "analysis"), Some("b"));
    }

    #[test]
    fn test_with_results_leaves_original_untouched() {
        let state = AcademicState::default();
        let next = state.with_results(nested("x", "y", json!(1)));
        assert!(state.results().is_empty());
        assert_eq!(next.result("x"), Some(&json!({"y": 1})));
    }

    #[test]
    fn test_missing_collections_are_empty() {
        let state = AcademicState::default();
        assert!(state.events().is_empty());
        assert!(state.task_list().is_empty());
        assert!(state.agent_outputs().is_none());
    }

    #[test]
    fn test_routing_decision_round_trips_through_results() {
        let decision = RoutingDecision::default();
        let state = AcademicState::default().with_results(crate::state::document::single(
            COORDINATOR_ANALYSIS_KEY,
            Value::Object(decision.to_analysis(Some("Thought: x"))),
        ));
        assert_eq!(state.routing_decision(), Some(decision));
    }

    #[test]
    fn test_has_output_for_ignores_empty_entries() {
        let state = AcademicState::default().with_results(crate::state::document::single(
            AGENT_OUTPUTS_KEY,
            json!({"planner": {"final_plan": {"plan": "do it"}}, "notewriter": {"generated_notes": {"notes": ""}}}),
        ));
        assert!(state.has_output_for(AgentKind::Planner));
        assert!(!state.has_output_for(AgentKind::NoteWriter));
        assert!(!state.has_output_for(AgentKind::Advisor));
    }

    #[test]
    fn test_learning_preference_lookup() {
        let state = AcademicState::new(profile(), Document::new(), Document::new());
        assert_eq!(state.learning_preference("learning_style"), json!({"visual": true}));
        assert_eq!(state.learning_preference("unknown"), json!({}));
    }
}
