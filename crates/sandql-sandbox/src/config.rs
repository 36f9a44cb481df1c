//! Sandbox configuration

use crate::error::{Result, SandboxError};
use sandql_query::ExecutorConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How result sets are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected table or json)", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => f.write_str("table"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Sandbox configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,

    /// Result output format
    pub output_format: OutputFormat,

    /// Longest accepted query, in characters
    pub max_query_length: usize,

    /// JSON table to load instead of the bundled students table
    pub table_file: Option<PathBuf>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            output_format: OutputFormat::Table,
            max_query_length: ExecutorConfig::default().max_query_length,
            table_file: None,
        }
    }
}

impl SandboxConfig {
    /// Create a new configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration for development
    pub fn for_development() -> Self {
        Self {
            log_level: "debug".to_string(),
            ..Default::default()
        }
    }

    /// Create configuration for scripts that parse the output
    pub fn for_scripting() -> Self {
        Self {
            log_level: "error".to_string(),
            output_format: OutputFormat::Json,
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| SandboxError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    /// Builder: set output format
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Builder: set log level
    pub fn log_level(mut self, level: &str) -> Self {
        self.log_level = level.to_string();
        self
    }

    /// Builder: set maximum query length
    pub fn max_query_length(mut self, max: usize) -> Self {
        self.max_query_length = max;
        self
    }

    /// Builder: load tables from a file
    pub fn table_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.table_file = Some(path.into());
        self
    }

    /// Executor settings derived from this configuration
    pub fn executor_config(&self) -> ExecutorConfig {
        ExecutorConfig::default().with_max_query_length(self.max_query_length)
    }
}
