//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave,
//! such as the per-call timeout applied to the completion backend.

use std::time::Duration;

/// Default per-call timeout for completion requests
pub const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 30;

/// Application behavior configuration.
///
/// Every persona turn and the synthesis call are bounded by
/// `completion_timeout`; a call that exceeds it is treated like any other
/// per-step failure.
#[derive(Debug, Clone)]
pub struct BehaviorConfig {
    pub completion_timeout: Duration,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self::with_timeout_seconds(DEFAULT_COMPLETION_TIMEOUT_SECS)
    }
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig with a timeout specified in seconds.
    pub fn with_timeout_seconds(seconds: u64) -> Self {
        Self {
            completion_timeout: Duration::from_secs(seconds),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            completion_timeout: timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        assert_eq!(
            BehaviorConfig::default().completion_timeout,
            Duration::from_secs(30)
        );
    }
}
