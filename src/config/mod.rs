//! Core configuration types
//!
//! This module contains the foundational types for config persistence:
//! - `StoreConfig` - Where the config document lives and how it is written
//! - `ConfigDocument` - The persisted document itself
//! - `Settings` / `Profile` - Typed views of its sections

mod document;
mod types;

pub use document::{ConfigDocument, Profile, Settings, DEFAULT_PROJECTS_PATH_KEY};
pub use types::{
    StoreConfig, StoreConfigBuilder, CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_PROJECTS_DIR,
};

pub(crate) use types::expand_home;
