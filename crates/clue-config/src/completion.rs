//! Completion request settings.

use serde::{Deserialize, Serialize};

/// Request budget in milliseconds before a completion is abandoned.
const fn default_timeout_ms() -> u64 {
    2000
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompletionConfig {
    /// Offer C keywords and the `for` snippet alongside identifiers.
    #[serde(default = "default_true")]
    pub keywords: bool,

    /// Offer header file names after `#include`.
    #[serde(default = "default_true")]
    pub header_search: bool,

    /// Time budget for one request.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            keywords: default_true(),
            header_search: default_true(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = CompletionConfig::default();
        assert!(config.keywords);
        assert!(config.header_search);
        assert_eq!(config.timeout_ms, 2000);
    }
}
