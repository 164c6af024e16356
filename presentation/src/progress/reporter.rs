//! Progress reporting for workflow runs

use atlas_application::ports::progress::ProgressNotifier;
use atlas_domain::{AgentKind, RoutingDecision, WorkflowNode, WorkflowStep};
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress with one bar per concurrent group
pub struct ProgressReporter {
    multi: MultiProgress,
    group_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            group_bar: Mutex::new(None),
        }
    }

    fn group_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("=>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    fn println(&self, line: String) {
        // Printing is best-effort; a closed terminal must not abort the run
        let _ = self.multi.println(line);
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// `PLANNER, NOTEWRITER`
pub fn agent_list(agents: &[AgentKind]) -> String {
    agents
        .iter()
        .map(AgentKind::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One line describing a finished workflow node
pub fn step_line(step: &WorkflowStep) -> String {
    let label = match step.node {
        WorkflowNode::AgentEntry(kind) => format!("dispatch {}", kind.display_name()),
        node => node.display_name().to_string(),
    };
    format!("[pass {}] {}", step.iteration, label)
}

impl ProgressNotifier for ProgressReporter {
    fn on_group_start(&self, index: usize, agents: &[AgentKind]) {
        let pb = self.multi.add(ProgressBar::new(agents.len() as u64));
        pb.set_style(Self::group_style());
        pb.set_prefix(format!("Group {}", index + 1));
        pb.set_message(agent_list(agents));

        if let Ok(mut bar) = self.group_bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_agent_complete(&self, kind: AgentKind, success: bool) {
        if let Ok(bar) = self.group_bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), kind.display_name())
            } else {
                format!("{} {}", "x".red(), kind.display_name())
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_group_complete(&self, index: usize) {
        if let Ok(mut bar) = self.group_bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_with_message(format!("Group {} complete", index + 1).green().to_string());
        }
    }

    fn on_step(&self, step: &WorkflowStep) {
        self.println(format!("{} {}", "->".cyan(), step_line(step)));
    }

    fn on_routing(&self, decision: &RoutingDecision) {
        self.println(format!(
            "{} {}",
            "Selected agents:".cyan().bold(),
            agent_list(&decision.required_agents)
        ));
    }

    fn on_fallback(&self, reason: &str) {
        self.println(format!("{} {}", "!".yellow().bold(), reason.yellow()));
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_group_start(&self, index: usize, agents: &[AgentKind]) {
        eprintln!(
            "{} {} ({})",
            "->".cyan(),
            format!("Group {}", index + 1).bold(),
            agent_list(agents)
        );
    }

    fn on_agent_complete(&self, kind: AgentKind, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), kind.display_name());
        } else {
            eprintln!("  {} {} (failed)", "x".red(), kind.display_name());
        }
    }

    fn on_group_complete(&self, _index: usize) {}

    fn on_step(&self, step: &WorkflowStep) {
        eprintln!("{} {}", "->".cyan(), step_line(step));
    }

    fn on_routing(&self, decision: &RoutingDecision) {
        eprintln!(
            "{} {}",
            "Selected agents:".cyan().bold(),
            agent_list(&decision.required_agents)
        );
    }

    fn on_fallback(&self, reason: &str) {
        eprintln!("{} {}", "!".yellow().bold(), reason);
    }
}
