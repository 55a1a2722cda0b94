//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These represent caller contract violations. Backend failures never
/// surface here; they are absorbed by fallback substitution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Prompt is empty after sanitization")]
    EmptyPrompt,

    #[error("Missing required context field: {0}")]
    MissingContext(&'static str),

    #[error("Unknown proposal kind: {0}")]
    UnknownProposalKind(String),

    #[error("Unknown backend mode: {0}")]
    UnknownBackendMode(String),
}
