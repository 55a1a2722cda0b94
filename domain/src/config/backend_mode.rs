//! Completion backend selection

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Which completion backend a deliberation talks to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// OpenAI-compatible HTTP API
    #[default]
    Live,
    /// Deterministic canned replies, no network
    Mock,
}

impl BackendMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendMode::Live => "live",
            BackendMode::Mock => "mock",
        }
    }
}

impl std::fmt::Display for BackendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BackendMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" | "openai" => Ok(BackendMode::Live),
            "mock" | "canned" | "offline" => Ok(BackendMode::Mock),
            other => Err(DomainError::UnknownBackendMode(other.to_string())),
        }
    }
}
