//! Common test utilities for projecttools integration tests
//!
//! Provides a temporary home directory with a store pointed into it.

#![allow(dead_code)]

use projecttools::{ConfigStore, StoreConfig};
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

// =============================================================================
// Test Fixtures
// =============================================================================

/// Temporary home directory plus an initialized store inside it
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub store: ConfigStore,
}

impl TestFixture {
    /// Create a fixture and run first-time initialization
    pub fn new() -> Self {
        let fixture = Self::uninitialized();
        fixture
            .store
            .ensure_initialized()
            .expect("Failed to initialize store");
        fixture
    }

    /// Create a fixture without touching the filesystem
    pub fn uninitialized() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = StoreConfig::builder()
            .home_dir(temp_dir.path())
            .app_version("0.1.0")
            .build()
            .expect("Failed to build store config");

        Self {
            temp_dir,
            store: ConfigStore::new(config),
        }
    }

    /// Create a fixture whose config file holds `document`
    pub fn with_document(document: &Value) -> Self {
        let fixture = Self::new();
        fixture.write_raw(&serde_json::to_string_pretty(document).unwrap());
        fixture
    }

    /// The fake home directory
    pub fn home(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    /// Path of the config file
    pub fn config_path(&self) -> PathBuf {
        self.store.config_path()
    }

    /// Overwrite the config file with arbitrary text
    pub fn write_raw(&self, contents: &str) {
        std::fs::write(self.config_path(), contents).expect("Failed to write config");
    }

    /// Raw text of the config file
    pub fn read_raw(&self) -> String {
        std::fs::read_to_string(self.config_path()).expect("Failed to read config")
    }

    /// Config file parsed as untyped JSON
    pub fn read_json(&self) -> Value {
        serde_json::from_str(&self.read_raw()).expect("Config is not valid JSON")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// A stored profile object as it would appear on disk
pub fn profile_json(name: &str) -> Value {
    serde_json::json!({
        "id": format!("prof_1700000000000_{name}"),
        "name": name,
        "created": "2023-11-14T22:13:20.000Z"
    })
}

/// Names from `list()`, in order
pub fn listed_names(store: &ConfigStore) -> Vec<String> {
    store
        .profiles()
        .list()
        .unwrap()
        .into_iter()
        .map(|e| e.profile.name)
        .collect()
}
