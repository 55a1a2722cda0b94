//! Deliberation phases

use serde::{Deserialize, Serialize};

/// Phase of a deliberation run
///
/// ```text
/// INIT ─▶ [Delegating] ─▶ Debating ─▶ Synthesizing ─▶ COMPLETE
///              │ success                                 ▲
///              └─────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliberationPhase {
    /// Optional attempt to hand the request to an external agent
    Delegating,
    /// Sequential persona debate
    Debating,
    /// Clerk synthesis
    Synthesizing,
}

impl DeliberationPhase {
    pub fn as_str(&self) -> &str {
        match self {
            DeliberationPhase::Delegating => "delegating",
            DeliberationPhase::Debating => "debating",
            DeliberationPhase::Synthesizing => "synthesizing",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            DeliberationPhase::Delegating => "External Delegation",
            DeliberationPhase::Debating => "Council Debate",
            DeliberationPhase::Synthesizing => "Clerk Synthesis",
        }
    }
}

impl std::fmt::Display for DeliberationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
