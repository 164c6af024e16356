//! Output format value object

use serde::{Deserialize, Serialize};

/// How the final result is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Routing summary followed by every agent's output (default)
    #[default]
    Full,
    /// Only the agent outputs
    Summary,
    /// The merged `agent_outputs` document as JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "summary" => Ok(Self::Summary),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
