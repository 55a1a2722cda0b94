//! External delegate port
//!
//! A delegate is a third-party agent service that may produce a proposal in
//! place of the local council. Every error here means "delegate unavailable";
//! none of them ever reaches the caller of a deliberation.

use async_trait::async_trait;
use council_domain::{DeliberationContext, ExternalAgentResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DelegateError {
    #[error("Endpoint rejected: {0}")]
    Rejected(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Delegate call timed out after {0}s")]
    Timeout(u64),

    #[error("Delegate call cancelled")]
    Cancelled,

    #[error("Response body exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Gateway for calling an external agent service
#[async_trait]
pub trait DelegateGateway: Send + Sync {
    /// Validate `endpoint` and exchange one request/response with it.
    ///
    /// Implementations enforce the endpoint policy, time bound and size
    /// bound; the returned response is still untrusted.
    async fn delegate(
        &self,
        endpoint: &str,
        prompt: &str,
        context: &DeliberationContext,
    ) -> Result<ExternalAgentResponse, DelegateError>;
}
