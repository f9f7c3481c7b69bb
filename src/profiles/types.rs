//! Outcomes of profile operations

use serde::Serialize;

use crate::config::Profile;

/// Result of [`ProfileManager::add`](super::ProfileManager::add)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedProfile {
    /// The profile as stored
    pub profile: Profile,

    /// It was the only profile and has been made active
    pub is_first_profile: bool,

    /// Original input, when normalization changed more than case and
    /// surrounding whitespace
    pub cleaned_from: Option<String>,
}

/// One row of [`ProfileManager::list`](super::ProfileManager::list)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileEntry {
    #[serde(flatten)]
    pub profile: Profile,

    /// Whether this is the active profile
    pub active: bool,
}

/// Result of [`ProfileManager::switch`](super::ProfileManager::switch)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchedProfile {
    /// Now-active profile
    pub profile_name: String,

    /// Profile that was active before, if any
    pub previous: Option<String>,
}

/// Result of [`ProfileManager::remove`](super::ProfileManager::remove)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovedProfile {
    pub removed_profile: String,

    /// The removed profile was the active one
    pub active_profile_changed: bool,

    /// Active profile after removal; `None` once no profiles remain
    pub active_profile: Option<String>,
}
