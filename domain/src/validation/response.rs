//! Validated backend responses
//!
//! [`PersonaReply`] and [`ClerkSynthesis`] are the only shapes the rest of
//! the system accepts from a completion backend or external agent. Both are
//! built exclusively through the field validators, whatever the source.

use super::extract::{extract_json_object, field};
use super::fields::{
    DEFAULT_CONFIDENCE, DEFAULT_SLIPPAGE_BPS, validate_amount, validate_bounded_integer,
    validate_confidence, validate_opinion, validate_pair, validate_risk_level,
    validate_slippage_bps, validate_strategy, validate_text,
};
use crate::council::Opinion;
use crate::deliberation::DeliberationResult;
use crate::proposal::{
    Proposal, ProposalKind, RiskLevel, Strategy, TokenLaunchProposal, TokenPair, TradeProposal,
};
use serde_json::{Map, Value};

const MAX_REASONING_CHARS: usize = 1_000;
const MAX_TOKEN_NAME_CHARS: usize = 32;
const MAX_TOKEN_DESCRIPTION_CHARS: usize = 280;

pub const DEFAULT_TOKEN_NAME: &str = "Council Token";
pub const DEFAULT_TOKEN_SYMBOL: &str = "CNCL";
pub const DEFAULT_VAULT_PCT: u8 = 10;
pub const DEFAULT_LOCKUP_DAYS: u32 = 30;

/// A debating persona's validated reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaReply {
    pub opinion: Opinion,
    pub reasoning: String,
    pub confidence: u8,
    pub suggested_strategy: Option<Strategy>,
}

impl PersonaReply {
    /// Parse and validate a raw backend response.
    ///
    /// Returns `None` only when no JSON object can be found; individual bad
    /// fields fall back to their defaults.
    pub fn from_response(response: &str) -> Option<Self> {
        extract_json_object(response).map(|map| Self::from_map(&map))
    }

    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            opinion: validate_opinion(field(map, &["opinion"])),
            reasoning: validate_text(field(map, &["reasoning"]), MAX_REASONING_CHARS)
                .unwrap_or_else(|| "No reasoning given.".to_string()),
            confidence: validate_confidence(field(map, &["confidence"])),
            suggested_strategy: validate_strategy(field(
                map,
                &["suggestedStrategy", "suggested_strategy", "strategy"],
            )),
        }
    }
}

/// The clerk's validated synthesis, before it is shaped into a proposal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClerkSynthesis {
    pub action: Option<Strategy>,
    pub pair: TokenPair,
    pub amount_in: String,
    pub expected_amount_out: String,
    pub max_slippage_bps: u32,
    pub token_name: String,
    pub token_symbol: String,
    pub token_description: String,
    pub vault_pct: u8,
    pub lockup_days: u32,
    pub reward_recipient: Option<String>,
    pub reasoning: String,
    pub confidence: u8,
    pub risk_level: RiskLevel,
}

impl ClerkSynthesis {
    pub fn from_response(response: &str) -> Option<Self> {
        extract_json_object(response).map(|map| Self::from_map(&map))
    }

    pub fn from_map(map: &Map<String, Value>) -> Self {
        let pair_obj = field(map, &["pair"]);
        let (token_in, token_out) = match pair_obj {
            Some(Value::Object(pair)) => validate_pair(
                field(pair, &["tokenIn", "token_in"]),
                field(pair, &["tokenOut", "token_out"]),
            ),
            Some(Value::String(pair)) => {
                let mut sides = pair.splitn(2, '/').map(|s| Value::String(s.to_string()));
                let token_in = sides.next();
                let token_out = sides.next();
                validate_pair(token_in.as_ref(), token_out.as_ref())
            }
            _ => validate_pair(
                field(map, &["tokenIn", "token_in"]),
                field(map, &["tokenOut", "token_out"]),
            ),
        };

        Self {
            action: validate_strategy(field(map, &["action", "strategy", "suggestedStrategy"])),
            pair: TokenPair::new(token_in, token_out),
            amount_in: validate_amount(field(map, &["amountIn", "amount_in"])),
            expected_amount_out: validate_amount(field(
                map,
                &["expectedAmountOut", "expected_amount_out"],
            )),
            max_slippage_bps: validate_slippage_bps(field(
                map,
                &["maxSlippageBps", "max_slippage_bps", "slippageBps"],
            )),
            token_name: validate_text(
                field(map, &["tokenName", "token_name"]),
                MAX_TOKEN_NAME_CHARS,
            )
            .unwrap_or_else(|| DEFAULT_TOKEN_NAME.to_string()),
            token_symbol: validate_token_symbol(field(map, &["tokenSymbol", "token_symbol"])),
            token_description: validate_text(
                field(map, &["tokenDescription", "token_description"]),
                MAX_TOKEN_DESCRIPTION_CHARS,
            )
            .unwrap_or_else(default_token_description),
            vault_pct: validate_bounded_integer(
                field(map, &["vaultPct", "vault_pct"]),
                0..=100,
                DEFAULT_VAULT_PCT as i64,
            ) as u8,
            lockup_days: validate_bounded_integer(
                field(map, &["lockupDays", "lockup_days"]),
                0..=365,
                DEFAULT_LOCKUP_DAYS as i64,
            ) as u32,
            reward_recipient: validate_text(
                field(map, &["rewardRecipient", "reward_recipient"]),
                128,
            ),
            reasoning: validate_text(field(map, &["reasoning"]), MAX_REASONING_CHARS)
                .unwrap_or_else(|| "No reasoning given.".to_string()),
            confidence: validate_confidence(field(map, &["confidence"])),
            risk_level: validate_risk_level(field(map, &["riskLevel", "risk_level"])),
        }
    }

    /// Deterministic synthesis used when the clerk cannot be reached
    pub fn canned(intent: Option<Strategy>) -> Self {
        Self {
            action: intent.or(Some(Strategy::Hold)),
            pair: TokenPair::default(),
            amount_in: "0".to_string(),
            expected_amount_out: "0".to_string(),
            max_slippage_bps: DEFAULT_SLIPPAGE_BPS,
            token_name: DEFAULT_TOKEN_NAME.to_string(),
            token_symbol: DEFAULT_TOKEN_SYMBOL.to_string(),
            token_description: default_token_description(),
            vault_pct: DEFAULT_VAULT_PCT,
            lockup_days: DEFAULT_LOCKUP_DAYS,
            reward_recipient: None,
            reasoning: "Synthesis unavailable; recording a conservative default.".to_string(),
            confidence: DEFAULT_CONFIDENCE,
            risk_level: RiskLevel::Medium,
        }
    }

    /// Variant implied by the action, trade when none
    pub fn implied_kind(&self) -> ProposalKind {
        self.action
            .map(|a| a.proposal_kind())
            .unwrap_or(ProposalKind::Trade)
    }

    /// Shape into the requested proposal variant
    pub fn into_proposal(
        self,
        kind: ProposalKind,
        deliberation: DeliberationResult,
        default_recipient: &str,
    ) -> Proposal {
        match kind {
            ProposalKind::Trade => Proposal::Trade(TradeProposal {
                pair: self.pair,
                strategy: match self.action {
                    Some(Strategy::Swap) => Strategy::Swap,
                    Some(Strategy::Dca) => Strategy::Dca,
                    _ => Strategy::Hold,
                },
                amount_in: self.amount_in,
                expected_amount_out: self.expected_amount_out,
                max_slippage_bps: self.max_slippage_bps,
                risk_level: self.risk_level,
                reasoning: self.reasoning,
                confidence: self.confidence,
                deliberation,
            }),
            ProposalKind::TokenLaunch => Proposal::TokenLaunch(TokenLaunchProposal {
                token_name: self.token_name,
                token_symbol: self.token_symbol,
                token_description: self.token_description,
                vault_pct: self.vault_pct,
                lockup_days: self.lockup_days,
                reward_recipient: self
                    .reward_recipient
                    .unwrap_or_else(|| default_recipient.to_string()),
                risk_level: self.risk_level,
                deliberation,
            }),
        }
    }
}

fn default_token_description() -> String {
    "Community token launched by council decision.".to_string()
}

/// Uppercase ASCII alphanumerics, 2 to 8 characters, otherwise the default
fn validate_token_symbol(value: Option<&Value>) -> String {
    let symbol: String = value
        .and_then(Value::as_str)
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .take(8)
        .collect();
    if symbol.len() < 2 {
        DEFAULT_TOKEN_SYMBOL.to_string()
    } else {
        symbol
    }
}

/// Which variant an untrusted proposal object claims to be.
///
/// Uses the `type` tag when present, otherwise the presence of token-launch
/// fields.
pub fn detect_proposal_kind(map: &Map<String, Value>) -> ProposalKind {
    if let Some(kind) = field(map, &["type", "kind"])
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<ProposalKind>().ok())
    {
        return kind;
    }
    if field(map, &["tokenName", "token_name", "tokenSymbol", "token_symbol"]).is_some() {
        ProposalKind::TokenLaunch
    } else {
        ProposalKind::Trade
    }
}

/// Normalize a proposal returned by an external agent.
///
/// Every field goes through the same validators as a clerk synthesis.
/// Returns `None` when the value is not an object or its variant differs
/// from `expected`; the caller substitutes a safe default of `expected`.
pub fn normalize_delegate_proposal(
    value: &Value,
    expected: ProposalKind,
    deliberation: DeliberationResult,
    default_recipient: &str,
) -> Option<Proposal> {
    let map = value.as_object()?;
    if detect_proposal_kind(map) != expected {
        return None;
    }
    let mut synthesis = ClerkSynthesis::from_map(map);
    if expected == ProposalKind::Trade && synthesis.action.is_none() && synthesis.amount_in != "0"
    {
        synthesis.action = Some(Strategy::Swap);
    }
    Some(synthesis.into_proposal(expected, deliberation, default_recipient))
}
