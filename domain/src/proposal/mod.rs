//! Proposals produced by a deliberation
//!
//! A proposal is either a trade or a token launch. The variant follows the
//! caller's expectation or, failing that, the detected intent.

pub mod entities;
pub mod tokens;

pub use entities::{
    Proposal, ProposalKind, RiskLevel, Strategy, TokenLaunchProposal, TokenPair, TradeProposal,
};
pub use tokens::{DEFAULT_TOKEN_IN, DEFAULT_TOKEN_OUT, KNOWN_TOKENS, TokenSide, known_token};
