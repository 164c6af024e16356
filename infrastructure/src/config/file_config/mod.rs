//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod llm;
mod logging;
mod output;
mod workflow;

pub use llm::FileLlmConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use workflow::{FileAgentsConfig, FileRoutingConfig, FileWorkflowConfig};

use atlas_application::ExecutionParams;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("llm.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("llm.model cannot be empty")]
    EmptyModelName,

    #[error("workflow.max_iterations must be at least 1")]
    InvalidMaxIterations,

    #[error("agents.event_window_days must be at least 1")]
    InvalidEventWindow,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Text-generation backend
    pub llm: FileLlmConfig,
    /// Coordinator routing settings
    pub routing: FileRoutingConfig,
    /// Agent pipeline settings
    pub agents: FileAgentsConfig,
    /// Loop policy settings
    pub workflow: FileWorkflowConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Transcript and diagnostic log locations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Some(0) = self.llm.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.workflow.max_iterations == 0 {
            return Err(ConfigValidationError::InvalidMaxIterations);
        }
        if self.agents.event_window_days == 0 {
            return Err(ConfigValidationError::InvalidEventWindow);
        }
        Ok(())
    }

    /// Parameters for the application-layer use cases
    pub fn execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_advisor_placement(self.routing.advisor_placement)
            .with_synthesis_temperature(self.agents.synthesis_temperature)
            .with_event_window_days(self.agents.event_window_days)
            .with_policy(self.workflow.policy, self.workflow.max_iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_domain::{AdvisorPlacement, OutputFormat, WorkflowPolicy};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[llm]
base_url = "http://localhost:8080/v1"
model = "gpt-4o-mini"
timeout_seconds = 30

[routing]
advisor_placement = "trailing_group"

[agents]
synthesis_temperature = 0.3

[workflow]
policy = "until_satisfied"
max_iterations = 2

[output]
format = "summary"
color = false

[logging]
conversation_log = "atlas.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.llm.base_url, "http://localhost:8080/v1");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.timeout_seconds, Some(30));
        assert_eq!(config.llm.api_key_env, "OPENAI_KEY");
        assert_eq!(config.agents.synthesis_temperature, 0.3);
        assert_eq!(config.output.format, OutputFormat::Summary);
        assert!(!config.output.color);
        assert_eq!(
            config.logging.conversation_log.as_deref(),
            Some(std::path::Path::new("atlas.jsonl"))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.max_tokens, 1024);
        assert!(config.llm.timeout_seconds.is_none());
        assert_eq!(config.routing.advisor_placement, AdvisorPlacement::TrailingGroup);
        assert_eq!(config.output.format, OutputFormat::Full);
        assert!(config.logging.log_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config: FileConfig = toml::from_str("[llm]\ntimeout_seconds = 0\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validate_empty_model_name() {
        let config: FileConfig = toml::from_str("[llm]\nmodel = \"  \"\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));
    }

    #[test]
    fn test_validate_zero_bounds() {
        let config: FileConfig = toml::from_str("[workflow]\nmax_iterations = 0\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidMaxIterations)
        );

        let config: FileConfig = toml::from_str("[agents]\nevent_window_days = 0\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidEventWindow));
    }

    #[test]
    fn test_execution_params_mapping() {
        let toml_str = r#"
[routing]
advisor_placement = "unscheduled"

[workflow]
policy = "until_satisfied"
max_iterations = 4
"#;
        let params = toml::from_str::<FileConfig>(toml_str)
            .unwrap()
            .execution_params();
        assert_eq!(params.advisor_placement, AdvisorPlacement::Unscheduled);
        assert_eq!(params.policy, WorkflowPolicy::UntilSatisfied);
        assert_eq!(params.max_iterations, 4);
        assert_eq!(params.event_window_days, 7);
    }
}
