//! Executor configuration

use serde::{Deserialize, Serialize};

/// Default bound on query length, in characters
pub const DEFAULT_MAX_QUERY_LENGTH: usize = 5000;

/// Query executor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Longest accepted query, in characters
    pub max_query_length: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_query_length: DEFAULT_MAX_QUERY_LENGTH,
        }
    }
}

impl ExecutorConfig {
    /// Set the longest accepted query
    pub fn with_max_query_length(mut self, max: usize) -> Self {
        self.max_query_length = max;
        self
    }
}
