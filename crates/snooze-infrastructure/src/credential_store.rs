//! File-backed credential slot.

use crate::paths::SnoozePaths;
use crate::storage::AtomicTomlFile;
use snooze_core::SnoozeError;
use snooze_core::credentials::{CredentialStore, Credentials};
use std::path::PathBuf;

/// Keeps the remembered `{token, username}` in `credentials.toml`.
///
/// Responsibilities:
/// - Atomic, owner-only writes of the single credential pair
/// - Treating a missing or empty file as "nothing remembered"
///
/// Does NOT:
/// - Validate the token (restore does that against the API)
/// - Store anything besides token and username
pub struct TomlCredentialStore {
    file: AtomicTomlFile<Credentials>,
}

impl TomlCredentialStore {
    /// Uses `credentials.toml` in the config directory resolved by `paths`.
    pub fn new(paths: &SnoozePaths) -> Result<Self, SnoozeError> {
        let path = paths
            .credentials_file()
            .map_err(|e| SnoozeError::storage(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a store at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path).owner_only(),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }
}

impl CredentialStore for TomlCredentialStore {
    fn load(&self) -> Result<Option<Credentials>, SnoozeError> {
        Ok(self.file.load()?)
    }

    fn save(&self, credentials: &Credentials) -> Result<(), SnoozeError> {
        self.file.save(credentials)?;
        tracing::debug!(
            "[Credentials] Remembered '{}' at {}",
            credentials.username,
            self.path().display()
        );
        Ok(())
    }

    fn clear(&self) -> Result<(), SnoozeError> {
        self.file.remove()?;
        tracing::debug!("[Credentials] Cleared {}", self.path().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_slot() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlCredentialStore::with_path(temp_dir.path().join("credentials.toml"));

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlCredentialStore::with_path(temp_dir.path().join("credentials.toml"));
        let credentials = Credentials::new("tok", "bob");

        store.save(&credentials).unwrap();
        assert_eq!(store.load().unwrap(), Some(credentials));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_only_token_and_username_are_written() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.toml");
        let store = TomlCredentialStore::with_path(path.clone());

        store.save(&Credentials::new("tok", "bob")).unwrap();

        let value: toml::Value = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let table = value.as_table().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table["token"].as_str(), Some("tok"));
        assert_eq!(table["username"].as_str(), Some("bob"));
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.toml");
        fs::write(&path, "token = 42").unwrap();

        let store = TomlCredentialStore::with_path(path);
        assert!(store.load().is_err());
    }
}
