//! Configuration loading for agent-council
//!
//! File and environment sources are merged by [`ConfigLoader`]; the raw
//! shapes live in [`file_config`]. CLI flags are applied on top by the
//! binary.

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL,
    FileBackendConfig, FileConfig, FileDelegateConfig, FileOutputConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
