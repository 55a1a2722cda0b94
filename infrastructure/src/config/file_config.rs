//! Raw TOML configuration data types
//!
//! These structs mirror the config file exactly. Domain enums are used
//! directly where a field has a closed set of values.

use crate::delegate::{DEFAULT_DELEGATE_TIMEOUT, DEFAULT_MAX_BODY_BYTES};
use council_domain::{BackendMode, OutputFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("backend.timeout_seconds cannot be 0")]
    InvalidBackendTimeout,

    #[error("delegate.timeout_seconds cannot be 0")]
    InvalidDelegateTimeout,

    #[error("delegate.max_body_bytes cannot be 0")]
    InvalidBodyLimit,

    #[error("backend.model cannot be empty")]
    EmptyModelName,

    #[error("backend.base_url cannot be empty in live mode")]
    EmptyBaseUrl,
}

/// Completion backend section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    pub mode: BackendMode,
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub timeout_seconds: u64,
    pub temperature: f32,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_seconds: 30,
            temperature: 0.4,
        }
    }
}

/// External delegation section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDelegateConfig {
    /// Delegate used when the request names none
    pub endpoint: Option<String>,
    /// Accept localhost endpoints (development only)
    pub allow_localhost: bool,
    pub timeout_seconds: u64,
    pub max_body_bytes: usize,
}

impl Default for FileDelegateConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            allow_localhost: false,
            timeout_seconds: DEFAULT_DELEGATE_TIMEOUT.as_secs(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

/// Complete configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub backend: FileBackendConfig,
    pub delegate: FileDelegateConfig,
    pub output: FileOutputConfig,
}

impl FileConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.backend.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidBackendTimeout);
        }
        if self.delegate.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidDelegateTimeout);
        }
        if self.delegate.max_body_bytes == 0 {
            return Err(ConfigValidationError::InvalidBodyLimit);
        }
        if self.backend.mode == BackendMode::Live {
            if self.backend.model.trim().is_empty() {
                return Err(ConfigValidationError::EmptyModelName);
            }
            if self.backend.base_url.trim().is_empty() {
                return Err(ConfigValidationError::EmptyBaseUrl);
            }
        }
        Ok(())
    }
}
