//! Application layer for agent-council
//!
//! This crate contains the deliberation use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    clock::{Clock, FixedClock, SystemClock},
    delegate::{DelegateError, DelegateGateway},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::run_deliberation::{
    DELEGATE_CONFIDENCE, RunDeliberationError, RunDeliberationUseCase,
};
