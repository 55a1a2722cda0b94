//! Presentation-level configuration
//!
//! Resolves how results are shown from CLI flags and the file config.

use council_domain::OutputFormat;

/// How deliberation progress is reported on stderr
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProgressMode {
    /// Animated bars, one per phase
    #[default]
    Bars,
    /// One plain line per step, for logs and pipes
    Plain,
    Off,
}

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    pub progress: ProgressMode,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            progress: ProgressMode::default(),
        }
    }
}

impl OutputConfig {
    /// CLI flags win over the file value, which wins over the default.
    /// JSON output never shows progress, so stdout stays machine-readable.
    /// A non-terminal stderr gets plain lines instead of bars.
    pub fn resolve(
        cli_format: Option<OutputFormat>,
        file_format: Option<OutputFormat>,
        color: bool,
        quiet: bool,
        interactive: bool,
    ) -> Self {
        let format = cli_format.or(file_format).unwrap_or_default();
        let progress = if quiet || format == OutputFormat::Json {
            ProgressMode::Off
        } else if interactive {
            ProgressMode::Bars
        } else {
            ProgressMode::Plain
        };
        Self {
            format,
            color,
            progress,
        }
    }

    /// Apply the color choice process-wide
    pub fn apply_color(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}
