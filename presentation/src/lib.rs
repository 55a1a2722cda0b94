//! Presentation layer for agent-council
//!
//! This crate contains the CLI definition, output formatters and
//! progress reporters.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, KindArg, OutputFormat};
pub use config::{OutputConfig, ProgressMode};
pub use output::{ConsoleFormatter, OutputFormatter};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
