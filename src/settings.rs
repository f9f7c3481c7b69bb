//! Typed access to the `settings` section of the config document

use std::path::{Component, Path, PathBuf};

use log::{debug, info};
use serde_json::Value;

use crate::config::{DEFAULT_PROJECTS_DIR, DEFAULT_PROJECTS_PATH_KEY, expand_home};
use crate::error::{self, Error, Result};
use crate::storage::StorageBackend;
use crate::store::ConfigStore;

/// Reads and writes individual settings
///
/// Obtained from [`ConfigStore::settings`]. Each call loads the document
/// fresh; setters write it back before returning.
pub struct SettingsManager<'a, S: StorageBackend> {
    store: &'a ConfigStore<S>,
}

impl<'a, S: StorageBackend> SettingsManager<'a, S> {
    /// Create a settings manager over a store
    pub fn new(store: &'a ConfigStore<S>) -> Self {
        Self { store }
    }

    /// Get a setting by key
    ///
    /// Returns `Ok(None)` when the key, or the whole settings section, is
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns an error only if the document cannot be loaded.
    pub fn get_setting(&self, key: &str) -> Result<Option<Value>> {
        let document = self.store.load()?;
        Ok(document.settings.as_ref().and_then(|s| s.get(key)))
    }

    /// Set a setting and persist the document
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidSettingValue`] if a typed key gets the wrong shape
    /// * Any load or save error
    pub fn set_setting(&self, key: &str, value: Value) -> Result<()> {
        let mut document = self.store.load()?;
        document.settings_mut().set(key, value)?;
        self.store.save(&document)?;
        debug!("Setting '{key}' saved");
        Ok(())
    }

    /// Remove a setting, returning whether it existed
    ///
    /// Nothing is written when the key was absent.
    pub fn unset_setting(&self, key: &str) -> Result<bool> {
        let mut document = self.store.load()?;
        let removed = document
            .settings
            .as_mut()
            .is_some_and(|settings| settings.remove(key));
        if removed {
            self.store.save(&document)?;
            debug!("Setting '{key}' removed");
        }
        Ok(removed)
    }

    /// The default projects directory, or `<home>/Projects` when unset
    pub fn default_projects_path(&self) -> Result<PathBuf> {
        let document = self.store.load()?;
        Ok(document
            .settings
            .and_then(|s| s.default_projects_path())
            .unwrap_or_else(|| self.store.home_dir().join(DEFAULT_PROJECTS_DIR)))
    }

    /// Set the default projects directory
    ///
    /// Expands `~`, resolves the path against the current directory, creates
    /// the directory, then persists it. Returns the path that was stored.
    ///
    /// # Errors
    ///
    /// * [`Error::DirectoryCreate`] if the directory cannot be created; nothing is persisted
    /// * Any load or save error
    pub fn set_default_projects_path(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let expanded = expand_home(path.as_ref(), self.store.home_dir());
        let resolved = resolve(&expanded)?;

        error::create_dir(&resolved)?;

        self.set_setting(
            DEFAULT_PROJECTS_PATH_KEY,
            Value::String(resolved.to_string_lossy().into_owned()),
        )?;
        info!("Default projects path set to {}", resolved.display());
        Ok(resolved)
    }
}

/// Absolute, lexically normalized form of `path`
fn resolve(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|e| {
        Error::Config(format!("Cannot resolve path '{}': {e}", path.display()))
    })?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}
