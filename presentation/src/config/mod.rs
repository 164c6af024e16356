//! Presentation-level configuration
//!
//! How results and progress are shown, resolved from the file settings and
//! the command line.

use crate::cli::commands::Cli;
use atlas_domain::OutputFormat;
use serde::{Deserialize, Serialize};

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show progress indicators
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Full,
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self {
            format,
            color,
            show_progress: true,
        }
    }

    /// Command-line flags win over file settings. JSON output never shows
    /// progress so stdout stays machine-readable.
    pub fn with_cli_overrides(mut self, cli: &Cli) -> Self {
        if let Some(format) = cli.format {
            self.format = format;
        }
        if cli.quiet || self.format == OutputFormat::Json {
            self.show_progress = false;
        }
        self
    }
}
