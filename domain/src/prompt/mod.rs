//! Prompt handling: sanitization, intent detection and templates

pub mod intent;
pub mod sanitizer;
pub mod template;

pub use intent::{IntentMatch, KeywordFamily, detect_intent};
pub use sanitizer::{MAX_PROMPT_CHARS, sanitize_prompt};
pub use template::CouncilPromptTemplate;
