//! Storage backend trait and implementations

use crate::error::{Error, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;

/// Trait for storage backend implementations
///
/// The config store only talks to the document through this trait, so a
/// test double or another format can be plugged in without touching the
/// profile and settings logic.
pub trait StorageBackend: Clone + Send + Sync {
    /// Serialize data to string
    fn serialize<T: Serialize>(&self, data: &T) -> Result<String>;

    /// Deserialize data from string
    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T>;

    /// Read and deserialize from file
    ///
    /// Content that cannot be parsed is reported as [`Error::CorruptConfig`].
    fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.deserialize(&content).map_err(|e| Error::CorruptConfig {
            path: path.to_path_buf(),
            reason: match e {
                Error::Serialize(inner) => inner.to_string(),
                other => other.to_string(),
            },
        })
    }

    /// Serialize and write to file
    ///
    /// Writes to a `.tmp` sibling first and renames it over the target, so a
    /// reader never sees a half-written document.
    fn write<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let content = self.serialize(data)?;

        if let Some(parent) = path.parent() {
            crate::error::create_dir(parent)?;
        }

        let file_name = path.file_name().ok_or_else(|| {
            Error::Config(format!(
                "Invalid path '{}': must have a filename",
                path.display()
            ))
        })?;
        let mut temp_filename = file_name.to_os_string();
        temp_filename.push(".tmp");
        let temp_path = path.with_file_name(temp_filename);

        std::fs::write(&temp_path, &content).map_err(|e| Error::FileWrite {
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, path).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

// =============================================================================
// JSON Storage Implementation
// =============================================================================

/// JSON storage backend (default)
///
/// Pretty output uses two-space indentation, matching what existing
/// installations already have on disk.
#[derive(Clone, Debug)]
pub struct JsonStorage {
    pretty: bool,
}

impl Default for JsonStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonStorage {
    /// Create a new JSON storage backend with pretty printing enabled
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Create a compact JSON storage (no pretty printing)
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl StorageBackend for JsonStorage {
    fn serialize<T: Serialize>(&self, data: &T) -> Result<String> {
        let mut out = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        out.push('\n');
        Ok(out)
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        serde_json::from_str(content).map_err(Error::from)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::tempdir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        name: String,
        tags: Vec<String>,
    }

    fn sample() -> Sample {
        Sample {
            name: "work".into(),
            tags: vec!["a".into()],
        }
    }

    #[test]
    fn test_json_serialize_two_space_indent() {
        let storage = JsonStorage::new();
        let json = storage.serialize(&sample()).unwrap();

        assert!(json.contains("\n  \"name\": \"work\""));
        assert!(json.contains("\n    \"a\""));
        assert!(json.ends_with('\n'));
    }

    #[test]
    fn test_json_serialize_compact() {
        let storage = JsonStorage::compact();
        let json = storage.serialize(&sample()).unwrap();

        assert_eq!(json.trim_end().lines().count(), 1);
    }

    #[test]
    fn test_write_creates_parent_and_leaves_no_temp_file() {
        let storage = JsonStorage::new();
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/config.json");

        storage.write(&path, &sample()).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("nested/config.json.tmp").exists());
        let loaded: Sample = storage.read(&path).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_read_nonexistent_file() {
        let storage = JsonStorage::new();
        let result: Result<Sample> = storage.read(Path::new("/nonexistent/config.json"));

        assert!(matches!(result.unwrap_err(), Error::FileRead { .. }));
    }

    #[test]
    fn test_read_garbage_is_corrupt_config() {
        let storage = JsonStorage::new();
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result: Result<Sample> = storage.read(&path);

        match result.unwrap_err() {
            Error::CorruptConfig { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
