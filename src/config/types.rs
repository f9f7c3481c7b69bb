//! Store configuration and its builder

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::storage::{JsonStorage, StorageBackend};

/// Directory under the home directory holding the config file
pub const CONFIG_DIR_NAME: &str = ".projecttools";

/// Name of the config document inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Fallback projects directory under the home directory
pub const DEFAULT_PROJECTS_DIR: &str = "Projects";

/// Configuration for a [`ConfigStore`](crate::ConfigStore)
///
/// Every path the core touches is explicit here, so tests can point a store
/// at a temporary directory and a fake home.
#[derive(Debug, Clone)]
pub struct StoreConfig<S: StorageBackend = JsonStorage> {
    /// Directory containing the config file
    pub config_dir: PathBuf,

    /// Config file name (default: "config.json")
    pub config_file: String,

    /// Version string written into freshly created documents
    pub app_version: String,

    /// Directory that a leading `~` expands to
    pub home_dir: PathBuf,

    /// Storage backend implementation
    pub storage: S,
}

impl<S: StorageBackend> StoreConfig<S> {
    /// Get the full path to the config document
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(&self.config_file)
    }
}

impl StoreConfig<JsonStorage> {
    /// Create a new builder for StoreConfig
    ///
    /// # Example
    /// ```rust
    /// use projecttools::StoreConfig;
    ///
    /// let config = StoreConfig::builder()
    ///     .home_dir("/home/alice")
    ///     .config_dir("~/.projecttools")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert!(config.config_path().ends_with(".projecttools/config.json"));
    /// ```
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::new()
    }
}

/// Builder for creating StoreConfig with a fluent API
#[derive(Debug, Clone)]
pub struct StoreConfigBuilder {
    config_dir: Option<PathBuf>,
    config_file: String,
    app_version: String,
    home_dir: Option<PathBuf>,
    pretty_json: bool,
}

impl Default for StoreConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreConfigBuilder {
    /// Create a new builder targeting `~/.projecttools/config.json`
    pub fn new() -> Self {
        Self {
            config_dir: None,
            config_file: CONFIG_FILE_NAME.into(),
            app_version: env!("CARGO_PKG_VERSION").into(),
            home_dir: None,
            pretty_json: true,
        }
    }

    /// Set the configuration directory
    ///
    /// Supports `~` expansion against the home directory.
    pub fn config_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(path.into());
        self
    }

    /// Set the config filename (default: "config.json")
    pub fn config_file(mut self, filename: impl Into<String>) -> Self {
        self.config_file = filename.into();
        self
    }

    /// Set the version recorded in new documents
    pub fn app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = version.into();
        self
    }

    /// Override the home directory (default: the OS user's home)
    pub fn home_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(path.into());
        self
    }

    /// Use compact JSON (no pretty printing)
    pub fn compact_json(mut self) -> Self {
        self.pretty_json = false;
        self
    }

    /// Build the StoreConfig
    ///
    /// # Errors
    ///
    /// Returns [`Error::HomeDirUnavailable`] if no home directory was given
    /// and the OS cannot provide one.
    pub fn build(self) -> Result<StoreConfig<JsonStorage>> {
        let home_dir = match self.home_dir {
            Some(home) => home,
            None => dirs::home_dir().ok_or(Error::HomeDirUnavailable)?,
        };

        let config_dir = match self.config_dir {
            Some(dir) => expand_home(&dir, &home_dir),
            None => home_dir.join(CONFIG_DIR_NAME),
        };

        let storage = if self.pretty_json {
            JsonStorage::new()
        } else {
            JsonStorage::compact()
        };

        Ok(StoreConfig {
            config_dir,
            config_file: self.config_file,
            app_version: self.app_version,
            home_dir,
            storage,
        })
    }
}

/// Expand a leading `~` component to `home`
pub(crate) fn expand_home(path: &Path, home: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}
