//! Key/value settings backends for persisted flag sets.
//!
//! Each key maps to a set of filenames. [`JsonSettings`] stores all keys in
//! one JSON object on disk; [`MemorySettings`] keeps them in memory.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Storage contract for string-set values.
pub trait SettingsStore {
    /// Load the set stored under `key`; a missing key is an empty set.
    fn load_set(&self, key: &str) -> anyhow::Result<BTreeSet<String>>;
    /// Replace the set stored under `key`.
    fn save_set(&mut self, key: &str, values: &BTreeSet<String>) -> anyhow::Result<()>;
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    sets: BTreeMap<String, BTreeSet<String>>,
}

impl SettingsStore for MemorySettings {
    fn load_set(&self, key: &str) -> anyhow::Result<BTreeSet<String>> {
        Ok(self.sets.get(key).cloned().unwrap_or_default())
    }

    fn save_set(&mut self, key: &str, values: &BTreeSet<String>) -> anyhow::Result<()> {
        self.sets.insert(key.to_string(), values.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JSON file
// ---------------------------------------------------------------------------

/// A JSON object file: `{ "readFlag": [...], "importantFlag": [...] }`.
///
/// Every `save_set` rewrites the whole file through a temporary sibling and
/// a rename, so a crash never leaves a truncated file behind.
#[derive(Debug, Clone)]
pub struct JsonSettings {
    path: PathBuf,
    sets: BTreeMap<String, BTreeSet<String>>,
}

impl JsonSettings {
    /// Open `path`, treating a missing file as empty.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let sets = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, sets })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(&self.sets)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SettingsStore for JsonSettings {
    fn load_set(&self, key: &str) -> anyhow::Result<BTreeSet<String>> {
        Ok(self.sets.get(key).cloned().unwrap_or_default())
    }

    fn save_set(&mut self, key: &str, values: &BTreeSet<String>) -> anyhow::Result<()> {
        self.sets.insert(key.to_string(), values.clone());
        self.flush()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
