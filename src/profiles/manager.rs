//! Profile manager implementation
//!
//! Handles profile lifecycle: add, list, switch, remove.

use log::{debug, info};

use crate::error::{Error, Result};
use crate::profiles::types::{AddedProfile, ProfileEntry, RemovedProfile, SwitchedProfile};
use crate::profiles::{clean_name, new_profile, require_name};
use crate::storage::StorageBackend;
use crate::store::ConfigStore;

// =============================================================================
// Profile Manager
// =============================================================================

/// Manages the profiles of a config document
///
/// The `ProfileManager` handles:
/// - Creating profiles and auto-activating the first one
/// - Listing profiles with their active flag
/// - Switching the active profile
/// - Removing profiles and repairing the active pointer
///
/// Each operation loads the document, validates, and saves at most once.
/// Domain errors are returned before anything is written.
pub struct ProfileManager<'a, S: StorageBackend> {
    store: &'a ConfigStore<S>,
}

impl<'a, S: StorageBackend> ProfileManager<'a, S> {
    /// Create a profile manager over a store
    pub fn new(store: &'a ConfigStore<S>) -> Self {
        Self { store }
    }

    // =========================================================================
    // Public API
    // =========================================================================

    /// Get the active profile name
    pub fn active(&self) -> Result<Option<String>> {
        Ok(self.store.load()?.active_profile)
    }

    /// List all profiles in creation order
    pub fn list(&self) -> Result<Vec<ProfileEntry>> {
        let document = self.store.load()?;
        let active = document.active_profile;

        Ok(document
            .profiles
            .into_iter()
            .map(|profile| ProfileEntry {
                active: active.as_deref() == Some(profile.name.as_str()),
                profile,
            })
            .collect())
    }

    /// Create a new profile
    ///
    /// The name is normalized with [`clean_name`]. If this is the only
    /// profile afterwards, it becomes active.
    ///
    /// # Errors
    ///
    /// * [`Error::EmptyProfileName`] for blank input
    /// * [`Error::ProfileAlreadyExists`] if the normalized name is taken
    pub fn add(&self, name: &str) -> Result<AddedProfile> {
        let clean = require_name(name)?;
        let cleaned_from = (clean != name.trim().to_lowercase()).then(|| name.to_string());
        if cleaned_from.is_some() {
            debug!("Profile name cleaned: \"{name}\" -> \"{clean}\"");
        }

        let mut document = self.store.load()?;
        if document.has_profile(&clean) {
            return Err(Error::ProfileAlreadyExists(clean));
        }

        let profile = new_profile(&clean)?;
        document.profiles.push(profile.clone());

        let is_first_profile = document.profiles.len() == 1;
        if is_first_profile {
            document.active_profile = Some(clean.clone());
        }

        self.store.save(&document)?;

        info!("Created profile '{clean}' ({})", profile.id);
        Ok(AddedProfile {
            profile,
            is_first_profile,
            cleaned_from,
        })
    }

    /// Switch to a different profile
    ///
    /// # Errors
    ///
    /// * [`Error::EmptyProfileName`] for blank input
    /// * [`Error::AlreadyActive`] if the profile is already active; nothing is written
    /// * [`Error::ProfileNotFound`] if no profile has that name
    pub fn switch(&self, name: &str) -> Result<SwitchedProfile> {
        let clean = require_name(name)?;
        let mut document = self.store.load()?;

        if document.active_profile.as_deref() == Some(clean.as_str()) {
            return Err(Error::AlreadyActive(clean));
        }
        if !document.has_profile(&clean) {
            return Err(Error::ProfileNotFound(clean));
        }

        let previous = document.active_profile.replace(clean.clone());
        self.store.save(&document)?;

        info!(
            "Switched profile: {} -> {clean}",
            previous.as_deref().unwrap_or("<none>")
        );
        Ok(SwitchedProfile {
            profile_name: clean,
            previous,
        })
    }

    /// Remove a profile
    ///
    /// If the removed profile was active, the first remaining profile takes
    /// over, or the pointer is cleared when none remain.
    ///
    /// # Errors
    ///
    /// * [`Error::EmptyProfileName`] for blank input
    /// * [`Error::ProfileNotFound`] if no profile has that name
    pub fn remove(&self, name: &str) -> Result<RemovedProfile> {
        let clean = require_name(name)?;
        let mut document = self.store.load()?;

        let position = document
            .profiles
            .iter()
            .position(|p| p.name == clean)
            .ok_or_else(|| Error::ProfileNotFound(clean.clone()))?;
        let removed = document.profiles.remove(position);

        let active_profile_changed = document.active_profile.as_deref() == Some(removed.name.as_str());
        if active_profile_changed {
            document.active_profile = document.profiles.first().map(|p| p.name.clone());
        }

        self.store.save(&document)?;

        info!("Removed profile '{}'", removed.name);
        if active_profile_changed {
            info!(
                "Active profile is now {}",
                document.active_profile.as_deref().unwrap_or("<none>")
            );
        }

        Ok(RemovedProfile {
            removed_profile: removed.name,
            active_profile_changed,
            active_profile: document.active_profile,
        })
    }

    /// Check if a profile exists, after normalizing `name`
    pub fn exists(&self, name: &str) -> Result<bool> {
        let document = self.store.load()?;
        Ok(document.has_profile(&clean_name(name)))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::config::StoreConfig;
    use crate::error::Error;
    use crate::store::ConfigStore;
    use tempfile::{TempDir, tempdir};

    fn create_test_store() -> (TempDir, ConfigStore) {
        let dir = tempdir().unwrap();
        let config = StoreConfig::builder().home_dir(dir.path()).build().unwrap();
        let store = ConfigStore::new(config);
        store.ensure_initialized().unwrap();
        (dir, store)
    }

    #[test]
    fn test_add_first_profile_activates() {
        let (_dir, store) = create_test_store();

        let added = store.profiles().add("Work").unwrap();

        assert_eq!(added.profile.name, "work");
        assert!(added.is_first_profile);
        assert_eq!(added.cleaned_from, None);
        assert_eq!(store.profiles().active().unwrap().as_deref(), Some("work"));
    }

    #[test]
    fn test_add_second_profile_does_not_activate() {
        let (_dir, store) = create_test_store();
        let profiles = store.profiles();

        profiles.add("work").unwrap();
        let added = profiles.add("home").unwrap();

        assert!(!added.is_first_profile);
        assert_eq!(profiles.active().unwrap().as_deref(), Some("work"));
    }

    #[test]
    fn test_add_reports_cleaning() {
        let (_dir, store) = create_test_store();

        let added = store.profiles().add("My Project!").unwrap();

        assert_eq!(added.profile.name, "my-project-");
        assert_eq!(added.cleaned_from.as_deref(), Some("My Project!"));
    }

    #[test]
    fn test_add_duplicate_after_normalization() {
        let (_dir, store) = create_test_store();
        let profiles = store.profiles();

        profiles.add("work").unwrap();
        let err = profiles.add("  WORK ").unwrap_err();

        assert!(matches!(err, Error::ProfileAlreadyExists(ref n) if n == "work"));
        assert!(err.to_string().contains("already exists"));
        assert_eq!(profiles.list().unwrap().len(), 1);
    }

    #[test]
    fn test_add_empty_name_writes_nothing() {
        let (_dir, store) = create_test_store();
        let before = std::fs::read_to_string(store.config_path()).unwrap();

        assert!(matches!(store.profiles().add("  "), Err(Error::EmptyProfileName)));

        let after = std::fs::read_to_string(store.config_path()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_switch_profile() {
        let (_dir, store) = create_test_store();
        let profiles = store.profiles();

        profiles.add("work").unwrap();
        profiles.add("home").unwrap();
        let switched = profiles.switch("Home").unwrap();

        assert_eq!(switched.profile_name, "home");
        assert_eq!(switched.previous.as_deref(), Some("work"));
        assert_eq!(profiles.active().unwrap().as_deref(), Some("home"));
    }

    #[test]
    fn test_switch_to_active_is_rejected() {
        let (_dir, store) = create_test_store();
        let profiles = store.profiles();
        profiles.add("work").unwrap();

        let err = profiles.switch("work").unwrap_err();

        assert!(matches!(err, Error::AlreadyActive(_)));
        assert!(err.to_string().contains("Already on profile"));
    }

    #[test]
    fn test_switch_nonexistent_profile() {
        let (_dir, store) = create_test_store();
        store.profiles().add("work").unwrap();

        let err = store.profiles().switch("ghost").unwrap_err();
        assert!(matches!(err, Error::ProfileNotFound(_)));
        assert_eq!(store.profiles().active().unwrap().as_deref(), Some("work"));
    }

    #[test]
    fn test_remove_nonexistent_profile() {
        let (_dir, store) = create_test_store();

        let err = store.profiles().remove("ghost").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_remove_inactive_keeps_pointer() {
        let (_dir, store) = create_test_store();
        let profiles = store.profiles();
        profiles.add("work").unwrap();
        profiles.add("home").unwrap();

        let removed = profiles.remove("home").unwrap();

        assert_eq!(removed.removed_profile, "home");
        assert!(!removed.active_profile_changed);
        assert_eq!(removed.active_profile.as_deref(), Some("work"));
    }

    #[test]
    fn test_exists_normalizes() {
        let (_dir, store) = create_test_store();
        store.profiles().add("work").unwrap();

        assert!(store.profiles().exists(" Work").unwrap());
        assert!(!store.profiles().exists("home").unwrap());
    }
}
