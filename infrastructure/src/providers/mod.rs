//! Completion backend adapters
//!
//! - [`OpenAiCompatibleGateway`]: live HTTP backend
//! - [`CannedGateway`]: deterministic offline backend
//!
//! Which one a run uses is decided once, at construction time.

pub mod canned;
pub mod openai;

pub use canned::CannedGateway;
pub use openai::{OpenAiCompatibleGateway, OpenAiSettings};
