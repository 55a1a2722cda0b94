//! Configuration value objects for the domain layer
//!
//! These are domain concepts related to configuration that are
//! used across multiple layers.

mod backend_mode;
mod output_format;

pub use backend_mode::BackendMode;
pub use output_format::OutputFormat;
