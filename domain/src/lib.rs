//! Domain layer for agent-council
//!
//! This crate contains the council's personas, the consensus rules, the
//! proposal model and every validator applied to untrusted input. It has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! Four debating personas speak in a fixed order, each seeing the transcript
//! so far. A fifth persona, the clerk, records the decision and never votes.
//!
//! ## Consensus
//!
//! Votes are tallied into `unanimous`, `majority`, `contested` or `vetoed`.
//! A veto from the Risk Sentinel overrides every count.
//!
//! ## Proposal
//!
//! The outcome is a trade or a token launch, always built through the
//! validators so out-of-range values collapse to safe defaults.

pub mod config;
pub mod core;
pub mod council;
pub mod deliberation;
pub mod prompt;
pub mod proposal;
pub mod validation;

pub use config::{BackendMode, OutputFormat};
pub use crate::core::error::DomainError;
pub use council::{
    AgentPersona, Consensus, ConsensusVerdict, CouncilMessage, EXTERNAL_DELEGATE, HookParameters,
    Opinion, PERSONAS, PersonaRegistry, RoleTag, VoteTally, calculate_consensus, has_veto,
    map_hook_parameters,
};
pub use deliberation::{
    DeliberationContext, DeliberationOutcome, DeliberationPhase, DeliberationRequest,
    DeliberationResult, ExternalAgentRequest, ExternalAgentResponse, OutcomeSource,
};
pub use prompt::{CouncilPromptTemplate, IntentMatch, detect_intent, sanitize_prompt};
pub use proposal::{
    Proposal, ProposalKind, RiskLevel, Strategy, TokenLaunchProposal, TokenPair, TradeProposal,
};
pub use validation::{ClerkSynthesis, PersonaReply, normalize_delegate_proposal};
