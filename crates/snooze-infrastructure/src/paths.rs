//! Unified path management for snooze files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/snooze/            # Config directory (platform default via `dirs`)
//! ├── config.toml              # Client configuration
//! └── credentials.toml         # {token, username} of the remembered login
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "snooze";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Platform config directory could not be determined.
    #[error("Cannot find the user configuration directory")]
    ConfigDirNotFound,
}

/// Resolves snooze file locations.
///
/// With a base path every file lives directly under it, which is how
/// tests and `--config-dir` keep state out of the real home directory.
#[derive(Debug, Clone, Default)]
pub struct SnoozePaths {
    base: Option<PathBuf>,
}

impl SnoozePaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the snooze configuration directory (e.g. `~/.config/snooze/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the remembered credentials.
    ///
    /// # Security Note
    ///
    /// The file holds a live API token and is written with 600 permissions.
    pub fn credentials_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("credentials.toml"))
    }
}
