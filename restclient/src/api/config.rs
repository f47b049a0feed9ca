//! Client configuration

use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// Retry policy for 404 responses. Zero retries by default.
///
/// In JSON the delay is given as `retry_delay_ms`, fractions allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub retry_count: u32,
    #[serde(rename = "retry_delay_ms", deserialize_with = "delay_from_millis")]
    pub retry_delay: Duration,
}

impl RetryConfig {
    pub fn new(retry_count: u32, retry_delay: Duration) -> Self {
        Self {
            retry_count,
            retry_delay,
        }
    }

    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }
}

fn delay_from_millis<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let millis = f64::deserialize(deserializer)?;
    Duration::try_from_secs_f64(millis / 1000.0).map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub retry: RetryConfig,
    /// Per-request timeout; 0 disables it.
    pub timeout_seconds: u64,
    /// Accept invalid TLS certificates.
    pub insecure: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            retry: RetryConfig::default(),
            timeout_seconds: 30,
            insecure: false,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_retry(mut self, retry_count: u32, retry_delay: Duration) -> Self {
        self.retry = RetryConfig::new(retry_count, retry_delay);
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Load a configuration from a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
