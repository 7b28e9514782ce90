use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Backend used when neither the config file nor the environment names one.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5001";

/// Fixed request bound of the pipeline.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ClientConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Directory for durable client storage; the platform config dir when unset.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            storage_dir: None,
            log_level: default_log_level(),
        }
    }
}

impl ClientConfig {
    /// The request bound. A zero `timeout_secs` reads as the default.
    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }

    /// Replaces values the client cannot run with by their defaults.
    pub fn validated(mut self) -> Self {
        if self.timeout_secs == 0 {
            tracing::warn!(
                default = DEFAULT_TIMEOUT_SECS,
                "timeout_secs must be positive, using the default"
            );
            self.timeout_secs = DEFAULT_TIMEOUT_SECS;
        }
        self
    }
}
