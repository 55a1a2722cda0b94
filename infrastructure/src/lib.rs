//! Infrastructure layer for agent-council
//!
//! Adapters implementing the application ports: the completion backends,
//! the external delegate client and configuration file loading.

pub mod config;
pub mod delegate;
pub mod providers;

#[cfg(test)]
mod test_support;

pub use config::{
    ConfigLoader, ConfigValidationError, FileBackendConfig, FileConfig, FileDelegateConfig,
    FileOutputConfig,
};
pub use delegate::{DelegateSettings, EndpointPolicy, EndpointRejection, HttpDelegateGateway};
pub use providers::{CannedGateway, OpenAiCompatibleGateway, OpenAiSettings};
