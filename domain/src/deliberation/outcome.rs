//! Deliberation outcome

use super::result::DeliberationResult;
use crate::council::HookParameters;
use crate::proposal::Proposal;
use serde::{Deserialize, Serialize};

/// Where the proposal came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutcomeSource {
    /// The local persona council
    Local,
    /// An external agent service
    Delegate {
        endpoint: String,
        payment_ref: Option<String>,
    },
}

impl OutcomeSource {
    pub fn is_delegate(&self) -> bool {
        matches!(self, OutcomeSource::Delegate { .. })
    }
}

/// Everything one deliberation produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliberationOutcome {
    pub deliberation: DeliberationResult,
    pub proposal: Proposal,
    pub hook_parameters: HookParameters,
    pub source: OutcomeSource,
}
