//! Output formatter trait

use council_domain::{DeliberationOutcome, OutputFormat};

/// Trait for formatting deliberation outcomes
pub trait OutputFormatter {
    /// Transcript, verdict, proposal and hook parameters
    fn format(&self, outcome: &DeliberationOutcome) -> String;

    fn format_json(&self, outcome: &DeliberationOutcome) -> String;

    /// Verdict, proposal and hook parameters only
    fn format_summary(&self, outcome: &DeliberationOutcome) -> String;

    /// Dispatch on the configured format
    fn render(&self, outcome: &DeliberationOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format(outcome),
            OutputFormat::Summary => self.format_summary(outcome),
            OutputFormat::Json => self.format_json(outcome),
        }
    }
}
