//! Deliberation run types
//!
//! A deliberation is stateless: a request goes in, an outcome comes out,
//! and nothing survives past that single cycle.

pub mod delegate;
pub mod outcome;
pub mod phase;
pub mod request;
pub mod result;

pub use delegate::{ExternalAgentRequest, ExternalAgentResponse};
pub use outcome::{DeliberationOutcome, OutcomeSource};
pub use phase::DeliberationPhase;
pub use request::{DeliberationContext, DeliberationRequest};
pub use result::DeliberationResult;
