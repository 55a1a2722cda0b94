//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for deliberation outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Transcript, verdict, proposal and hook parameters (default)
    #[default]
    Full,
    /// Verdict, proposal and hook parameters only
    Summary,
    /// The outcome as JSON
    Json,
}
