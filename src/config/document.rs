//! The persisted config document
//!
//! Field names are camelCase on disk to stay compatible with existing
//! `config.json` files. Keys this crate does not know about are collected
//! into `extra` maps and written back unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Settings key holding the default projects directory
pub const DEFAULT_PROJECTS_PATH_KEY: &str = "defaultProjectsPath";

/// The whole config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    /// Version of the tool that created the document (informational)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub app_version: String,

    /// User settings; `None` when the key is absent from the file
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub settings: Option<Settings>,

    /// Name of the active profile
    #[serde(default)]
    pub active_profile: Option<String>,

    /// Profiles in creation order
    #[serde(default)]
    pub profiles: Vec<Profile>,

    /// Reserved for workspace management
    #[serde(default)]
    pub workspaces: Vec<Value>,

    /// Reserved for project management
    #[serde(default)]
    pub projects: Vec<Value>,

    /// Unknown top-level keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConfigDocument {
    /// A fresh document with no profiles and no settings
    pub fn new(app_version: impl Into<String>) -> Self {
        Self {
            app_version: app_version.into(),
            settings: None,
            active_profile: None,
            profiles: Vec::new(),
            workspaces: Vec::new(),
            projects: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Look up a profile by its stored (normalized) name
    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Check if a profile exists
    pub fn has_profile(&self, name: &str) -> bool {
        self.profile(name).is_some()
    }

    /// Settings section, created on first write
    pub fn settings_mut(&mut self) -> &mut Settings {
        self.settings.get_or_insert_with(Settings::default)
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Map a present key to `Some`, even when its value is `null`
///
/// A missing key falls back to `#[serde(default)]`, so absent and `null`
/// stay distinguishable on the way back out.
fn deserialize_present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// The `settings` object
///
/// Values are kept exactly as read, whatever their type. The typed view of
/// [`DEFAULT_PROJECTS_PATH_KEY`] is applied on access and on
/// [`Settings::set`], never while loading, so a hand-edited value cannot make
/// the document unreadable. A literal `null` in place of the object is kept
/// as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: Option<Map<String, Value>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            values: Some(Map::new()),
        }
    }
}

impl Settings {
    /// Get a setting as stored
    pub fn get(&self, key: &str) -> Option<Value> {
        self.values.as_ref()?.get(key).cloned()
    }

    /// The default projects path, if it is set to a string
    pub fn default_projects_path(&self) -> Option<PathBuf> {
        self.values
            .as_ref()?
            .get(DEFAULT_PROJECTS_PATH_KEY)?
            .as_str()
            .map(PathBuf::from)
    }

    /// Set a setting from a JSON value
    ///
    /// `null` for [`DEFAULT_PROJECTS_PATH_KEY`] removes it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSettingValue`] if [`DEFAULT_PROJECTS_PATH_KEY`]
    /// gets anything but a string or `null`.
    pub fn set(&mut self, key: &str, value: Value) -> Result<()> {
        if key == DEFAULT_PROJECTS_PATH_KEY {
            match value {
                Value::String(_) => {}
                Value::Null => {
                    self.remove(key);
                    return Ok(());
                }
                other => {
                    return Err(Error::InvalidSettingValue {
                        key: key.to_string(),
                        reason: format!("expected a path string, got {other}"),
                    });
                }
            }
        }
        self.values
            .get_or_insert_with(Map::new)
            .insert(key.to_string(), value);
        Ok(())
    }

    /// Remove a setting, returning whether it was present
    pub fn remove(&mut self, key: &str) -> bool {
        self.values
            .as_mut()
            .is_some_and(|values| values.remove(key).is_some())
    }
}

// =============================================================================
// Profile
// =============================================================================

/// A stored profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique id, `prof_<millis>_<suffix>`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Normalized name, the key used by every lookup
    pub name: String,

    /// ISO-8601 creation time, kept as written
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created: String,

    /// Unknown per-profile keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
