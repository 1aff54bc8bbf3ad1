//! Configuration service implementation.
//!
//! Loads the client configuration from `config.toml` in the snooze config
//! directory. A missing file means defaults.

use crate::paths::SnoozePaths;
use crate::storage::{AtomicTomlError, AtomicTomlFile};
use snooze_core::SnoozeError;
use snooze_core::config::ClientConfig;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

/// Configuration service that loads and caches `ClientConfig`.
#[derive(Clone)]
pub struct ConfigService {
    file: Arc<AtomicTomlFile<ClientConfig>>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new(paths: &SnoozePaths) -> Result<Self, SnoozeError> {
        let path = paths
            .config_file()
            .map_err(|e| SnoozeError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a service reading a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<ClientConfig, SnoozeError> {
        {
            let read_lock = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.file.load()?.unwrap_or_default();
        tracing::debug!(
            "[Config] Loaded {} (base_url = {})",
            self.file.path().display(),
            loaded.base_url
        );

        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }

    /// Persists a new base url after checking it parses.
    pub fn set_base_url(&self, base_url: &str) -> Result<(), SnoozeError> {
        let candidate = ClientConfig {
            base_url: base_url.trim().to_string(),
        };
        let base_url = candidate.validated_base_url()?;

        self.file.update(ClientConfig::default(), |config| {
            config.base_url = base_url;
            Ok::<(), AtomicTomlError>(())
        })?;
        self.invalidate_cache();

        tracing::info!("[Config] Saved base_url to {}", self.file.path().display());
        Ok(())
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        assert_eq!(service.get_config().unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_reads_file_and_caches() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, r#"base_url = "http://localhost:5000""#).unwrap();
        let service = ConfigService::with_path(path.clone());

        assert_eq!(service.get_config().unwrap().base_url, "http://localhost:5000");

        fs::write(&path, r#"base_url = "http://changed.test""#).unwrap();
        assert_eq!(service.get_config().unwrap().base_url, "http://localhost:5000");

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().base_url, "http://changed.test");
    }

    #[test]
    fn test_set_base_url_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::with_path(path.clone());
        service.get_config().unwrap();

        service.set_base_url("http://localhost:5000/").unwrap();

        assert_eq!(service.get_config().unwrap().base_url, "http://localhost:5000");
        let reread = ConfigService::with_path(path);
        assert_eq!(reread.get_config().unwrap().base_url, "http://localhost:5000");
    }

    #[test]
    fn test_set_invalid_base_url_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::with_path(path.clone());

        let err = service.set_base_url("not a url").unwrap_err();
        assert!(matches!(err, SnoozeError::Config(_)));
        assert!(!path.exists());
    }
}
