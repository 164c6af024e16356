//! Output formatter trait

use atlas_application::WorkflowOutcome;

/// Trait for rendering a finished workflow
pub trait OutputFormatter {
    /// Routing summary plus every agent's output
    fn format(&self, request: &str, outcome: &WorkflowOutcome) -> String;

    /// The merged `agent_outputs` document as JSON
    fn format_json(&self, outcome: &WorkflowOutcome) -> String;

    /// Agent outputs only
    fn format_summary(&self, outcome: &WorkflowOutcome) -> String;
}
