//! LLM Gateway port
//!
//! Defines the interface for communicating with a completion backend.

use async_trait::async_trait;
use council_domain::AgentPersona;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Missing API key: environment variable {0} is not set")]
    MissingApiKey(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// Gateway for LLM communication
///
/// This port defines how the application layer reaches a completion backend.
/// Implementations (adapters) live in the infrastructure layer; the live and
/// canned backends are both just implementations of this trait.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Create a session speaking as `persona`.
    ///
    /// The persona directive becomes the session's system prompt.
    async fn create_session(
        &self,
        persona: &AgentPersona,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;

    /// Short label for logs and `--show-config`
    fn backend_name(&self) -> &str;
}

/// An active LLM session
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Id of the persona this session speaks for
    fn persona_id(&self) -> &str;

    /// Send a message and get a response
    async fn send(&self, content: &str) -> Result<String, GatewayError>;
}
