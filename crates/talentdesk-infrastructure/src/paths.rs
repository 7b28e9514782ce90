//! Path resolution for TalentDesk client files.
//!
//! ```text
//! ~/.config/talentdesk/
//! ├── config.toml      # ClientConfig
//! └── storage.json     # durable key-value storage (unless storage_dir is set)
//! ```

use std::path::{Path, PathBuf};

const APP_DIR: &str = "talentdesk";
const CONFIG_FILE: &str = "config.toml";
const STORAGE_FILE: &str = "storage.json";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for talentdesk_core::DeskError {
    fn from(e: PathError) -> Self {
        talentdesk_core::DeskError::config(e.to_string())
    }
}

pub struct TalentDeskPaths;

impl TalentDeskPaths {
    /// Returns the TalentDesk configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: e.g. `~/.config/talentdesk/`
    /// - `Err(PathError::ConfigDirNotFound)`: no platform config directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Returns the durable storage file.
    ///
    /// `storage_dir` overrides the config directory when given.
    pub fn storage_file(storage_dir: Option<&Path>) -> Result<PathBuf, PathError> {
        match storage_dir {
            Some(dir) => Ok(dir.join(STORAGE_FILE)),
            None => Ok(Self::config_dir()?.join(STORAGE_FILE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_dir_override() {
        let path = TalentDeskPaths::storage_file(Some(Path::new("/tmp/desk"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/desk/storage.json"));
    }

    #[test]
    fn test_config_file_lives_in_app_dir() {
        if let Ok(path) = TalentDeskPaths::config_file() {
            assert!(path.ends_with("talentdesk/config.toml"));
        }
    }
}
