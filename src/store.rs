//! Config document persistence
//!
//! [`ConfigStore`] owns the path to `config.json` and performs every read and
//! write of it. Managers borrow the store and run one load-modify-save cycle
//! per operation; nothing is cached between calls.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::{ConfigDocument, StoreConfig};
use crate::error::{self, Result};
use crate::profiles::ProfileManager;
use crate::settings::SettingsManager;
use crate::storage::{JsonStorage, StorageBackend};

/// Reads and writes the config document at a fixed path
///
/// # Example
///
/// ```rust,no_run
/// use projecttools::ConfigStore;
///
/// # fn example() -> projecttools::Result<()> {
/// let store = ConfigStore::at_default_location()?;
/// store.ensure_initialized()?;
///
/// store.profiles().add("work")?;
/// for entry in store.profiles().list()? {
///     println!("{} {}", if entry.active { "*" } else { " " }, entry.profile.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigStore<S: StorageBackend = JsonStorage> {
    config: StoreConfig<S>,
}

impl ConfigStore<JsonStorage> {
    /// Store for `~/.projecttools/config.json`
    ///
    /// # Errors
    ///
    /// Fails if the user's home directory cannot be determined.
    pub fn at_default_location() -> Result<Self> {
        Ok(Self::new(StoreConfig::builder().build()?))
    }
}

impl<S: StorageBackend> ConfigStore<S> {
    /// Create a store. No filesystem access happens here.
    pub fn new(config: StoreConfig<S>) -> Self {
        Self { config }
    }

    /// Path of the config document
    pub fn config_path(&self) -> PathBuf {
        self.config.config_path()
    }

    /// Directory that `~` expands to for this store
    pub fn home_dir(&self) -> &Path {
        &self.config.home_dir
    }

    /// The document written on first run
    pub fn default_document(&self) -> ConfigDocument {
        ConfigDocument::new(self.config.app_version.clone())
    }

    /// Create the config directory and, if missing, the default document
    ///
    /// Returns `true` when the document was created by this call. Callers
    /// should treat an error as fatal: nothing else can be persisted.
    ///
    /// # Errors
    ///
    /// * [`Error::DirectoryCreate`](crate::Error::DirectoryCreate) if the config directory cannot be created
    /// * [`Error::FileWrite`](crate::Error::FileWrite) if the default document cannot be written
    pub fn ensure_initialized(&self) -> Result<bool> {
        error::create_dir(&self.config.config_dir)?;

        let path = self.config_path();
        if path.exists() {
            debug!("Config already present at {}", path.display());
            return Ok(false);
        }

        self.save(&self.default_document())?;
        info!("Initialized configuration at {}", path.display());
        Ok(true)
    }

    /// Load the document
    ///
    /// A missing file yields the default document.
    ///
    /// # Errors
    ///
    /// * [`Error::FileRead`](crate::Error::FileRead) if the file exists but cannot be read
    /// * [`Error::CorruptConfig`](crate::Error::CorruptConfig) if it is not a valid document
    pub fn load(&self) -> Result<ConfigDocument> {
        let path = self.config_path();
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(self.default_document());
        }

        let document: ConfigDocument = self.config.storage.read(&path)?;
        debug!(
            "Loaded config from {} ({} profiles)",
            path.display(),
            document.profiles.len()
        );
        Ok(document)
    }

    /// Load the document, falling back to defaults on any failure
    ///
    /// The failure is logged and otherwise discarded. Use this only for
    /// read-only display; mutating through a fallback document would
    /// overwrite whatever is on disk.
    pub fn load_or_default(&self) -> ConfigDocument {
        match self.load() {
            Ok(document) => document,
            Err(e) => {
                warn!("Error loading configuration: {e}");
                self.default_document()
            }
        }
    }

    /// Write the whole document
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, document: &ConfigDocument) -> Result<()> {
        let path = self.config_path();
        self.config.storage.write(&path, document)?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Settings accessors backed by this store
    pub fn settings(&self) -> SettingsManager<'_, S> {
        SettingsManager::new(self)
    }

    /// Profile lifecycle operations backed by this store
    pub fn profiles(&self) -> ProfileManager<'_, S> {
        ProfileManager::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;
    use tempfile::{TempDir, tempdir};

    fn create_test_store() -> (TempDir, ConfigStore) {
        let dir = tempdir().unwrap();
        let config = StoreConfig::builder()
            .home_dir(dir.path())
            .app_version("0.1.0")
            .build()
            .unwrap();
        (dir, ConfigStore::new(config))
    }

    #[test]
    fn test_ensure_initialized_writes_default_once() {
        let (_dir, store) = create_test_store();

        assert!(store.ensure_initialized().unwrap());
        assert!(store.config_path().exists());

        let mut doc = store.load().unwrap();
        doc.active_profile = Some("kept".into());
        store.save(&doc).unwrap();

        assert!(!store.ensure_initialized().unwrap());
        assert_eq!(store.load().unwrap().active_profile.as_deref(), Some("kept"));
    }

    #[test]
    fn test_ensure_initialized_fails_when_dir_blocked() {
        let (dir, store) = create_test_store();
        // A plain file where the config directory should go
        std::fs::write(dir.path().join(".projecttools"), "").unwrap();

        let err = store.ensure_initialized().unwrap_err();
        assert!(matches!(err, Error::DirectoryCreate { .. }));
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let (_dir, store) = create_test_store();

        assert_eq!(store.load().unwrap(), store.default_document());
    }

    #[test]
    fn test_load_corrupt_file() {
        let (_dir, store) = create_test_store();
        store.ensure_initialized().unwrap();
        std::fs::write(store.config_path(), "{\"profiles\": 3").unwrap();

        assert!(matches!(store.load(), Err(Error::CorruptConfig { .. })));
        assert_eq!(store.load_or_default(), store.default_document());
    }

    #[test]
    fn test_save_load_is_lossless() {
        let (_dir, store) = create_test_store();
        store.ensure_initialized().unwrap();
        let raw = json!({
            "appVersion": "0.0.9",
            "activeProfile": "a",
            "profiles": [{ "id": "prof_1_x", "name": "a", "created": "2023-04-05T06:07:08.009Z" }],
            "workspaces": [],
            "projects": [{ "name": "legacy" }],
            "futureKey": [1, 2, 3]
        });
        std::fs::write(
            store.config_path(),
            serde_json::to_string_pretty(&raw).unwrap(),
        )
        .unwrap();

        store.save(&store.load().unwrap()).unwrap();

        let text = std::fs::read_to_string(store.config_path()).unwrap();
        let reread: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(reread, raw);
        assert!(text.contains("\n  \"activeProfile\": \"a\""));
    }
}
