use anyhow::Context;
use serde::{Deserialize, Serialize};

use extract::ExtractorConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub parser: ParserConfig,
    pub retry: RetryConfig,
    pub cache: CacheConfig,
    pub extraction: ExtractorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// CoreNLP server endpoint.
    pub endpoint: String,
    /// Annotators requested from the server.
    pub annotators: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub enabled: bool,
    pub max_entries: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig {
                endpoint: "http://localhost:9000".to_string(),
                annotators: "depparse".to_string(),
                timeout_secs: 15,
            },
            retry: RetryConfig {
                max_retries: 3,
                initial_backoff_ms: 500,
                max_backoff_ms: 5000,
            },
            cache: CacheConfig {
                enabled: true,
                max_entries: 10000,
            },
            extraction: ExtractorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file. The file replaces the defaults
    /// wholesale; there is no per-field fallback.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config = serde_json::from_str(&raw).context("Failed to parse config file")?;
        Ok(config)
    }
}
