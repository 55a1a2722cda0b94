//! Council domain
//!
//! The council is a fixed roster of personas that debate a request in order,
//! each seeing the transcript so far, followed by a non-voting clerk that
//! records the decision.
//!
//! ```text
//! Alpha Hunter ─▶ Risk Sentinel ─▶ Macro Oracle ─▶ Devil's Advocate ─▶ Council Clerk
//!   (votes)        (votes, veto)     (votes)          (votes)          (reports only)
//! ```
//!
//! - [`persona`]: the immutable roster
//! - [`message`]: transcript entries and opinions
//! - [`consensus`]: tally and verdict with veto precedence
//! - [`hook`]: verdict → fee / size / sentiment control values

pub mod consensus;
pub mod hook;
pub mod message;
pub mod persona;

pub use consensus::{Consensus, ConsensusVerdict, VoteTally, calculate_consensus, has_veto};
pub use hook::{HookParameters, map_hook_parameters, sentiment_score};
pub use message::{CouncilMessage, Opinion};
pub use persona::{AgentPersona, EXTERNAL_DELEGATE, PERSONAS, PersonaRegistry, RoleTag};
