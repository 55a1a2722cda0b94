//! OpenAI-compatible completion gateway
//!
//! Talks to any server exposing `POST {base_url}/chat/completions`. Each
//! session is stateless: one system message (the persona directive) and one
//! user message per call.

use async_trait::async_trait;
use council_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use council_domain::AgentPersona;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

/// Connection settings for the live backend
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub temperature: f32,
    pub timeout: Duration,
}

pub struct OpenAiCompatibleGateway {
    client: reqwest::Client,
    settings: OpenAiSettings,
    label: String,
}

impl OpenAiCompatibleGateway {
    pub fn new(settings: OpenAiSettings) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder().timeout(settings.timeout);
        if is_local_base_url(&settings.base_url) {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;
        let label = format!("openai-compatible ({})", settings.model);
        Ok(Self {
            client,
            settings,
            label,
        })
    }

    /// Read the API key from `api_key_env`
    pub fn api_key_from_env(api_key_env: &str) -> Result<String, GatewayError> {
        std::env::var(api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GatewayError::MissingApiKey(api_key_env.to_string()))
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }
}

/// Local inference servers are reached directly, never through a proxy
fn is_local_base_url(base_url: &str) -> bool {
    match url::Url::parse(base_url).ok().and_then(|u| u.host().map(|h| h.to_owned())) {
        Some(url::Host::Domain(name)) => name.eq_ignore_ascii_case("localhost"),
        Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
        Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatibleGateway {
    async fn create_session(
        &self,
        persona: &AgentPersona,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(OpenAiSession {
            client: self.client.clone(),
            endpoint: self.endpoint(),
            model: self.settings.model.clone(),
            api_key: self.settings.api_key.clone(),
            temperature: self.settings.temperature,
            persona_id: persona.id.to_string(),
            system_prompt: persona.directive.to_string(),
        }))
    }

    fn backend_name(&self) -> &str {
        &self.label
    }
}

pub struct OpenAiSession {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    persona_id: String,
    system_prompt: String,
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn persona_id(&self) -> &str {
        &self.persona_id
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let request_body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": self.system_prompt},
                {"role": "user", "content": content}
            ],
            "temperature": self.temperature,
            "response_format": {"type": "json_object"}
        });

        debug!(persona = %self.persona_id, model = %self.model, "Sending completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!(
                "API error ({}): {}",
                status.as_u16(),
                council_domain::core::string::truncate(&body, 200)
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                GatewayError::InvalidResponse("missing choices[0].message.content".to_string())
            })
    }
}
