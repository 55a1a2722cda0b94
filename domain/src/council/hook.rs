//! Hook parameter mapping
//!
//! Deterministically converts a deliberation outcome into the control values
//! a downstream fee hook consumes. This module only produces the values;
//! applying them is someone else's job.

use super::consensus::{Consensus, VoteTally};
use crate::proposal::RiskLevel;
use serde::{Deserialize, Serialize};

/// Fee applied when risk is high or the council vetoed (100%)
pub const FEE_BPS_BLOCKING: u32 = 10_000;
/// Fee for low-risk unanimous decisions (5%)
pub const FEE_BPS_PREFERRED: u32 = 500;
/// Fee for contested decisions (50%)
pub const FEE_BPS_CONTESTED: u32 = 5_000;
/// Fee for everything else (30%)
pub const FEE_BPS_DEFAULT: u32 = 3_000;

pub const MAX_SWAP_SIZE_RESTRICTED: &str = "100";
pub const MAX_SWAP_SIZE_MEDIUM: &str = "1000";
pub const MAX_SWAP_SIZE_LARGE: &str = "10000";

/// Control values derived from a deliberation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookParameters {
    pub fee_bps: u32,
    /// Numeric string, dimensionless
    pub max_swap_size: String,
    /// Always within `-100..=100`
    pub sentiment_score: i32,
    pub sentiment_reason: String,
}

/// Map a consensus outcome to hook parameters
pub fn map_hook_parameters(
    consensus: Consensus,
    tally: &VoteTally,
    risk_level: RiskLevel,
) -> HookParameters {
    let vetoed = consensus == Consensus::Vetoed;

    let fee_bps = if risk_level == RiskLevel::High || vetoed {
        FEE_BPS_BLOCKING
    } else if risk_level == RiskLevel::Low && consensus == Consensus::Unanimous {
        FEE_BPS_PREFERRED
    } else if consensus == Consensus::Contested {
        FEE_BPS_CONTESTED
    } else {
        FEE_BPS_DEFAULT
    };

    let max_swap_size = if risk_level == RiskLevel::High || vetoed {
        MAX_SWAP_SIZE_RESTRICTED
    } else if risk_level == RiskLevel::Medium {
        MAX_SWAP_SIZE_MEDIUM
    } else {
        MAX_SWAP_SIZE_LARGE
    };

    HookParameters {
        fee_bps,
        max_swap_size: max_swap_size.to_string(),
        sentiment_score: sentiment_score(tally),
        sentiment_reason: format!(
            "Council {}: {} support, {} oppose, {} abstain (risk: {})",
            consensus, tally.support, tally.oppose, tally.abstain, risk_level
        ),
    }
}

/// Net support as a percentage of all votes, clamped to `-100..=100`
pub fn sentiment_score(tally: &VoteTally) -> i32 {
    let total = tally.total();
    if total == 0 {
        return 0;
    }
    let net = tally.support as f64 - tally.oppose as f64;
    let score = (net / total as f64 * 100.0).round() as i32;
    score.clamp(-100, 100)
}
