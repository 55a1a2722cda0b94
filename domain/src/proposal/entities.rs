//! Proposal entities

use super::tokens::{DEFAULT_TOKEN_IN, DEFAULT_TOKEN_OUT};
use crate::core::error::DomainError;
use crate::deliberation::DeliberationResult;
use serde::{Deserialize, Serialize};

/// Risk classification of a proposal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            _ => Err(()),
        }
    }
}

/// The primary action a proposal recommends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Swap,
    Dca,
    TokenLaunch,
    Hold,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Swap => "swap",
            Strategy::Dca => "dca",
            Strategy::TokenLaunch => "token_launch",
            Strategy::Hold => "hold",
        }
    }

    /// Proposal variant this strategy produces
    pub fn proposal_kind(&self) -> ProposalKind {
        match self {
            Strategy::TokenLaunch => ProposalKind::TokenLaunch,
            _ => ProposalKind::Trade,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Strategy {
    type Err = ();

    /// Lenient parse of backend-suggested strategies.
    ///
    /// Liquidity provision is not a supported action and maps to `Swap`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "swap" | "trade" | "exchange" | "buy" | "sell" => Ok(Strategy::Swap),
            "lp" | "liquidity" | "add_liquidity" | "provide_liquidity" => Ok(Strategy::Swap),
            "dca" | "dollar_cost_average" | "dollar_cost_averaging" => Ok(Strategy::Dca),
            "token_launch" | "launch" | "launch_token" | "tokenlaunch" => {
                Ok(Strategy::TokenLaunch)
            }
            "hold" | "wait" | "none" | "no_action" => Ok(Strategy::Hold),
            _ => Err(()),
        }
    }
}

/// Which proposal variant a caller expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalKind {
    Trade,
    TokenLaunch,
}

impl ProposalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalKind::Trade => "trade",
            ProposalKind::TokenLaunch => "token_launch",
        }
    }
}

impl std::fmt::Display for ProposalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProposalKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "trade" | "swap" => Ok(ProposalKind::Trade),
            "token_launch" | "launch" => Ok(ProposalKind::TokenLaunch),
            other => Err(DomainError::UnknownProposalKind(other.to_string())),
        }
    }
}

/// Trading pair, `token_in` is spent and `token_out` received
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub token_in: String,
    pub token_out: String,
}

impl TokenPair {
    pub fn new(token_in: impl Into<String>, token_out: impl Into<String>) -> Self {
        Self {
            token_in: token_in.into(),
            token_out: token_out.into(),
        }
    }
}

impl Default for TokenPair {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_IN, DEFAULT_TOKEN_OUT)
    }
}

impl std::fmt::Display for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.token_in, self.token_out)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeProposal {
    pub pair: TokenPair,
    pub strategy: Strategy,
    /// `"0"` or a value in `(0, 1_000_000]`
    pub amount_in: String,
    /// `"0"` or a value in `(0, 1_000_000]`
    pub expected_amount_out: String,
    pub max_slippage_bps: u32,
    pub risk_level: RiskLevel,
    pub reasoning: String,
    pub confidence: u8,
    pub deliberation: DeliberationResult,
}

impl TradeProposal {
    /// Zero-sized hold on the default pair
    pub fn safe_default(reasoning: impl Into<String>, deliberation: DeliberationResult) -> Self {
        Self {
            pair: TokenPair::default(),
            strategy: Strategy::Hold,
            amount_in: "0".to_string(),
            expected_amount_out: "0".to_string(),
            max_slippage_bps: 50,
            risk_level: RiskLevel::Medium,
            reasoning: reasoning.into(),
            confidence: 50,
            deliberation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenLaunchProposal {
    pub token_name: String,
    pub token_symbol: String,
    pub token_description: String,
    /// Share of supply locked in the vault, `0..=100`
    pub vault_pct: u8,
    pub lockup_days: u32,
    pub reward_recipient: String,
    pub risk_level: RiskLevel,
    pub deliberation: DeliberationResult,
}

impl TokenLaunchProposal {
    pub fn safe_default(
        reward_recipient: impl Into<String>,
        deliberation: DeliberationResult,
    ) -> Self {
        Self {
            token_name: "Council Token".to_string(),
            token_symbol: "CNCL".to_string(),
            token_description: "Token launch recorded by the council with default parameters."
                .to_string(),
            vault_pct: 10,
            lockup_days: 30,
            reward_recipient: reward_recipient.into(),
            risk_level: RiskLevel::Medium,
            deliberation,
        }
    }
}

/// Final decision of a deliberation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Proposal {
    Trade(TradeProposal),
    TokenLaunch(TokenLaunchProposal),
}

impl Proposal {
    /// Minimal safe proposal of the given variant
    pub fn safe_default(
        kind: ProposalKind,
        deliberation: DeliberationResult,
        reward_recipient: &str,
    ) -> Self {
        match kind {
            ProposalKind::Trade => Proposal::Trade(TradeProposal::safe_default(
                "No usable proposal was produced; holding.",
                deliberation,
            )),
            ProposalKind::TokenLaunch => Proposal::TokenLaunch(TokenLaunchProposal::safe_default(
                reward_recipient,
                deliberation,
            )),
        }
    }

    pub fn kind(&self) -> ProposalKind {
        match self {
            Proposal::Trade(_) => ProposalKind::Trade,
            Proposal::TokenLaunch(_) => ProposalKind::TokenLaunch,
        }
    }

    pub fn risk_level(&self) -> RiskLevel {
        match self {
            Proposal::Trade(p) => p.risk_level,
            Proposal::TokenLaunch(p) => p.risk_level,
        }
    }
}
