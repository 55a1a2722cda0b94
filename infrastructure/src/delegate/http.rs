//! HTTP delegate gateway
//!
//! Posts an [`ExternalAgentRequest`] to a validated endpoint and reads back
//! an [`ExternalAgentResponse`]. The exchange is bounded in time, in size
//! and by an optional cancellation token. Redirects are never followed.

use super::endpoint::EndpointPolicy;
use async_trait::async_trait;
use council_application::ports::delegate::{DelegateError, DelegateGateway};
use council_domain::{DeliberationContext, ExternalAgentRequest, ExternalAgentResponse};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

pub const DEFAULT_DELEGATE_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct DelegateSettings {
    pub policy: EndpointPolicy,
    pub timeout: Duration,
    pub max_body_bytes: usize,
}

impl Default for DelegateSettings {
    fn default() -> Self {
        Self {
            policy: EndpointPolicy::default(),
            timeout: DEFAULT_DELEGATE_TIMEOUT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

pub struct HttpDelegateGateway {
    client: reqwest::Client,
    settings: DelegateSettings,
    cancel: CancellationToken,
}

impl HttpDelegateGateway {
    pub fn new(settings: DelegateSettings) -> Result<Self, DelegateError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .no_proxy()
            .user_agent(concat!("agent-council/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DelegateError::RequestFailed(e.to_string()))?;
        Ok(Self {
            client,
            settings,
            cancel: CancellationToken::new(),
        })
    }

    /// Abort in-flight calls when `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    async fn exchange(
        &self,
        url: Url,
        request: &ExternalAgentRequest,
    ) -> Result<ExternalAgentResponse, DelegateError> {
        let limit = self.settings.max_body_bytes;

        let mut response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| DelegateError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DelegateError::Status(status.as_u16()));
        }

        if let Some(declared) = response.content_length()
            && declared > limit as u64
        {
            return Err(DelegateError::TooLarge { limit });
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| DelegateError::RequestFailed(e.to_string()))?
        {
            if body.len() + chunk.len() > limit {
                return Err(DelegateError::TooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&body).map_err(|e| DelegateError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl DelegateGateway for HttpDelegateGateway {
    async fn delegate(
        &self,
        endpoint: &str,
        prompt: &str,
        context: &DeliberationContext,
    ) -> Result<ExternalAgentResponse, DelegateError> {
        let url = self.settings.policy.validate(endpoint).map_err(|rejection| {
            warn!("Delegate endpoint rejected: {}", rejection);
            DelegateError::Rejected(rejection.to_string())
        })?;

        let request = ExternalAgentRequest {
            prompt: prompt.to_string(),
            context: context.clone(),
            request_id: Uuid::new_v4().to_string(),
        };
        debug!(request_id = %request.request_id, host = ?url.host_str(), "Calling delegate");

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(DelegateError::Cancelled),
            result = tokio::time::timeout(self.settings.timeout, self.exchange(url, &request)) => {
                match result {
                    Ok(response) => response,
                    Err(_) => Err(DelegateError::Timeout(self.settings.timeout.as_secs())),
                }
            }
        }
    }
}
