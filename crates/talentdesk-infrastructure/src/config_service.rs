//! Configuration service.
//!
//! Loads [`ClientConfig`] from `~/.config/talentdesk/config.toml`, applies
//! environment overrides and caches the result.

use crate::paths::TalentDeskPaths;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use talentdesk_core::config::ClientConfig;
use talentdesk_core::{DeskError, Result};

/// Environment variable that overrides `api_base_url`.
pub const API_BASE_URL_ENV: &str = "TALENTDESK_API_BASE_URL";

/// Loads and caches the client configuration.
///
/// A missing file yields the defaults; the file is never created.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Uses the platform config file.
    pub fn new() -> Self {
        Self {
            path: TalentDeskPaths::config_file().ok(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Uses an explicit config file.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// An unreadable file is logged and replaced by the defaults, as is a
    /// non-positive timeout.
    pub fn get_config(&self) -> ClientConfig {
        {
            let cached = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(config) = cached.as_ref() {
                return config.clone();
            }
        }

        let mut loaded = self
            .load()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to load config, using defaults");
                ClientConfig::default()
            })
            .validated();
        apply_env_overrides(&mut loaded, std::env::var(API_BASE_URL_ENV).ok());

        let mut cache = self.config.write().unwrap_or_else(|e| e.into_inner());
        *cache = Some(loaded.clone());
        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut cache = self.config.write().unwrap_or_else(|e| e.into_inner());
        *cache = None;
    }

    fn load(&self) -> Result<ClientConfig> {
        let Some(path) = self.path.as_ref() else {
            return Err(DeskError::config("No config directory available"));
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(ClientConfig::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_env_overrides(config: &mut ClientConfig, api_base_url: Option<String>) {
    if let Some(url) = api_base_url.filter(|url| !url.trim().is_empty()) {
        config.api_base_url = url;
    }
}
