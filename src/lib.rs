//! # projecttools
//!
//! Profile and settings management for the `pt` command line tool.
//!
//! All state lives in a single JSON document, `~/.projecttools/config.json`
//! by default. The library exposes three layers over it:
//!
//! - **[`ConfigStore`]**: loads, saves and first-run-initializes the document
//! - **[`SettingsManager`]**: typed get/set over the `settings` section
//! - **[`ProfileManager`]**: add, list, switch and remove profiles
//!
//! Every operation is a fresh load-modify-save cycle. Nothing is cached, so
//! separate invocations of `pt` always see each other's writes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use projecttools::{ConfigStore, StoreConfig};
//!
//! # fn example() -> projecttools::Result<()> {
//! let config = StoreConfig::builder()
//!     .config_dir("~/.projecttools")
//!     .build()?;
//! let store = ConfigStore::new(config);
//! store.ensure_initialized()?;
//!
//! let added = store.profiles().add("Work")?;
//! if added.is_first_profile {
//!     println!("{} is now active", added.profile.name);
//! }
//!
//! store.settings().set_default_projects_path("~/code")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Operations return [`Result`]. Domain failures (blank or duplicate names,
//! unknown profiles, switching to the profile that is already active) are
//! distinguishable from I/O failures through [`Error::is_domain_error`], and
//! never modify the document. A config file that cannot be parsed is
//! reported as [`Error::CorruptConfig`] rather than silently replaced;
//! [`ConfigStore::load_or_default`] is available for read-only callers that
//! prefer defaults.
//!
//! ## Document Format
//!
//! ```json
//! {
//!   "appVersion": "0.1.0",
//!   "settings": { "defaultProjectsPath": "/home/alice/code" },
//!   "activeProfile": "work",
//!   "profiles": [
//!     { "id": "prof_1714558830123_k3j9x0a1b", "name": "work", "created": "2024-05-01T10:20:30.123Z" }
//!   ],
//!   "workspaces": [],
//!   "projects": []
//! }
//! ```
//!
//! Keys this crate does not recognize are preserved on every write.

mod error;
mod settings;
mod store;

pub mod config;
pub mod profiles;
pub mod storage;

pub use config::{ConfigDocument, Profile, Settings, StoreConfig, StoreConfigBuilder};
pub use error::{Error, Result};
pub use profiles::{
    AddedProfile, ProfileEntry, ProfileManager, RemovedProfile, SwitchedProfile, clean_name,
};
pub use settings::SettingsManager;
pub use storage::{JsonStorage, StorageBackend};
pub use store::ConfigStore;
