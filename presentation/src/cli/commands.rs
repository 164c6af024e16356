//! CLI command definitions

use atlas_domain::{AdvisorPlacement, OutputFormat, WorkflowPolicy};
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for atlas
#[derive(Parser, Debug)]
#[command(name = "atlas")]
#[command(author, version, about = "Academic Task Learning Agent System - planning, notes and guidance for students")]
#[command(long_about = r#"
Atlas routes a student's request to specialized agents and merges their work.

The process has three steps:
1. Coordination: the coordinator decides which agents to run and in which groups
2. Execution: each group runs its agents in parallel, groups run in order
3. Rendering: every agent's output is printed (or emitted as JSON)

Agents:
  PLANNER     schedule built from the calendar and task list
  NOTEWRITER  study notes matched to the learning style
  ADVISOR     personalized academic guidance

Configuration files are loaded from (in priority order):
1. ATLAS_<SECTION>__<KEY> environment variables
2. --config <path>            Explicit config file
3. ./atlas.toml               Project-level config
4. ~/.config/atlas/config.toml   Global config

Example:
  atlas --profile profiles.json --calendar calendar.json --tasks tasks.json \
        --student-id student_123 "Help me prepare for my exam tomorrow"
  atlas --check-auth
"#)]
pub struct Cli {
    /// The request for the agents (not required with --check-auth or --show-config)
    pub request: Option<String>,

    /// Student profile records (`{"profiles": [...]}` or a single profile)
    #[arg(long, value_name = "PATH")]
    pub profile: Option<PathBuf>,

    /// Calendar record (`{"events": [...]}`)
    #[arg(long, value_name = "PATH")]
    pub calendar: Option<PathBuf>,

    /// Task record (`{"tasks": [...]}`)
    #[arg(long, value_name = "PATH")]
    pub tasks: Option<PathBuf>,

    /// Student to load from the profile records (defaults to the first profile's id)
    #[arg(long, value_name = "ID")]
    pub student_id: Option<String>,

    /// Output format: full, summary or json
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Where ADVISOR runs when required: trailing_group or unscheduled
    #[arg(long, value_name = "PLACEMENT")]
    pub advisor_placement: Option<AdvisorPlacement>,

    /// Loop policy: single_pass or until_satisfied
    #[arg(long, value_name = "POLICY")]
    pub policy: Option<WorkflowPolicy>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Check the text-generation service is reachable and exit
    #[arg(long)]
    pub check_auth: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_invocation() {
        let cli = Cli::parse_from([
            "atlas",
            "--profile",
            "p.json",
            "--calendar",
            "c.json",
            "--tasks",
            "t.json",
            "--student-id",
            "student_123",
            "--format",
            "json",
            "--advisor-placement",
            "unscheduled",
            "--policy",
            "until_satisfied",
            "-vv",
            "Plan my week",
        ]);

        assert_eq!(cli.request.as_deref(), Some("Plan my week"));
        assert_eq!(cli.profile, Some(PathBuf::from("p.json")));
        assert_eq!(cli.student_id.as_deref(), Some("student_123"));
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.advisor_placement, Some(AdvisorPlacement::Unscheduled));
        assert_eq!(cli.policy, Some(WorkflowPolicy::UntilSatisfied));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_flags_without_request() {
        let cli = Cli::parse_from(["atlas", "--check-auth", "--no-config"]);
        assert!(cli.check_auth);
        assert!(cli.no_config);
        assert!(cli.request.is_none());
        assert!(cli.format.is_none());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["atlas", "--format", "yaml", "hi"]).is_err());
    }
}
