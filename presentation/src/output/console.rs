//! Console output formatter for workflow results

use crate::output::formatter::OutputFormatter;
use crate::progress::reporter::agent_list;
use atlas_application::WorkflowOutcome;
use atlas_domain::{AgentKind, Document, OutputFormat};
use colored::Colorize;
use serde_json::Value;

/// Formats workflow results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render in the configured format
    pub fn render(format: OutputFormat, request: &str, outcome: &WorkflowOutcome) -> String {
        match format {
            OutputFormat::Full => Self::format(request, outcome),
            OutputFormat::Summary => Self::format_summary(outcome),
            OutputFormat::Json => Self::format_json(outcome),
        }
    }

    pub fn format(request: &str, outcome: &WorkflowOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Atlas Results"));
        output.push('\n');

        output.push_str(&format!("{} {}\n\n", "Request:".cyan().bold(), request));

        if let Some(decision) = outcome.routing() {
            output.push_str(&format!(
                "{} {}\n",
                "Selected agents:".cyan().bold(),
                agent_list(&decision.required_agents)
            ));
            output.push_str(&format!(
                "{} {}\n",
                "Reasoning:".cyan().bold(),
                decision.reasoning
            ));
            if outcome.iterations() > 1 {
                output.push_str(&format!(
                    "{} {}\n",
                    "Passes:".cyan().bold(),
                    outcome.iterations()
                ));
            }
        }

        output.push_str(&Self::section_header("Agent Outputs"));
        output.push_str(&Self::agent_sections(&outcome.agent_outputs()));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &WorkflowOutcome) -> String {
        serde_json::to_string_pretty(&outcome.agent_outputs()).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_summary(outcome: &WorkflowOutcome) -> String {
        Self::agent_sections(&outcome.agent_outputs())
    }

    fn agent_sections(outputs: &Document) -> String {
        let mut output = String::new();
        for (key, value) in outputs {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {} ──", key.to_uppercase()).yellow().bold(),
                Self::agent_text(key, value)
            ));
        }
        output
    }

    /// Primary text of one agent's output, or pretty JSON for anything
    /// without a known text field
    pub fn agent_text(key: &str, value: &Value) -> String {
        let paths: &[&[&str]] = match key.parse::<AgentKind>() {
            Ok(AgentKind::Planner) => &[&["final_plan", "plan"], &["plan"]],
            Ok(AgentKind::NoteWriter) => &[&["generated_notes", "notes"]],
            Ok(AgentKind::Advisor) => &[&["guidance", "advice"]],
            Err(_) => &[],
        };

        paths
            .iter()
            .find_map(|path| {
                path.iter()
                    .try_fold(value, |node, field| node.get(field))
                    .and_then(Value::as_str)
            })
            .map(str::to_string)
            .unwrap_or_else(|| {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            })
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, request: &str, outcome: &WorkflowOutcome) -> String {
        Self::format(request, outcome)
    }

    fn format_json(&self, outcome: &WorkflowOutcome) -> String {
        Self::format_json(outcome)
    }

    fn format_summary(&self, outcome: &WorkflowOutcome) -> String {
        Self::format_summary(outcome)
    }
}
