//! State store — per-filename read and important flags.
//!
//! The store owns two persisted sets (`readFlag`, `importantFlag`) and one
//! piece of session-only state: the record currently being viewed.
//!
//! # Read lifecycle
//!
//! ```text
//!   Unread ──select──► Viewing ──select away──► Read
//!      ▲                                          │
//!      └──────────────── mark unread ─────────────┘
//! ```
//!
//! Bulk `set_read` bypasses `Viewing` entirely. Every mutating method takes
//! `&mut self`, so no count query can observe a half-applied change.

use crate::settings::SettingsStore;
use std::collections::{BTreeSet, HashSet};

/// Settings key holding the set of read filenames.
pub const READ_FLAG_KEY: &str = "readFlag";
/// Settings key holding the set of important filenames.
pub const IMPORTANT_FLAG_KEY: &str = "importantFlag";

/// Session view of a record's read flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadState {
    Unread,
    /// Currently selected; becomes `Read` once selection moves away.
    Viewing,
    Read,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateStore {
    read: BTreeSet<String>,
    important: BTreeSet<String>,
    viewing: Option<String>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load both flag sets from a settings backend.
    pub fn load(settings: &dyn SettingsStore) -> anyhow::Result<Self> {
        let store = Self {
            read: settings.load_set(READ_FLAG_KEY)?,
            important: settings.load_set(IMPORTANT_FLAG_KEY)?,
            viewing: None,
        };
        tracing::debug!(
            read = store.read.len(),
            important = store.important.len(),
            "flag state loaded"
        );
        Ok(store)
    }

    /// Write both flag sets back. The viewing record is not implicitly
    /// marked read; call [`StateStore::end_viewing`] first for that.
    pub fn save(&self, settings: &mut dyn SettingsStore) -> anyhow::Result<()> {
        settings.save_set(READ_FLAG_KEY, &self.read)?;
        settings.save_set(IMPORTANT_FLAG_KEY, &self.important)?;
        tracing::debug!(
            read = self.read.len(),
            important = self.important.len(),
            "flag state saved"
        );
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Flags
    // -----------------------------------------------------------------------

    pub fn is_read(&self, filename: &str) -> bool {
        self.read.contains(filename)
    }

    /// Set the persisted read flag directly, bypassing `Viewing`.
    pub fn set_read(&mut self, filename: &str, read: bool) {
        if self.viewing.as_deref() == Some(filename) {
            self.viewing = None;
        }
        if read {
            self.read.insert(filename.to_string());
        } else {
            self.read.remove(filename);
        }
    }

    pub fn is_important(&self, filename: &str) -> bool {
        self.important.contains(filename)
    }

    pub fn set_important(&mut self, filename: &str, important: bool) {
        if important {
            self.important.insert(filename.to_string());
        } else {
            self.important.remove(filename);
        }
    }

    pub fn read_count(&self) -> usize {
        self.read.len()
    }

    pub fn important_count(&self) -> usize {
        self.important.len()
    }

    // -----------------------------------------------------------------------
    // Viewing
    // -----------------------------------------------------------------------

    pub fn read_state(&self, filename: &str) -> ReadState {
        if self.viewing.as_deref() == Some(filename) {
            ReadState::Viewing
        } else if self.is_read(filename) {
            ReadState::Read
        } else {
            ReadState::Unread
        }
    }

    pub fn viewing(&self) -> Option<&str> {
        self.viewing.as_deref()
    }

    /// Unread → Viewing. Whatever record was being viewed becomes `Read`
    /// first; records already read stay `Read`.
    pub fn begin_viewing(&mut self, filename: &str) {
        if self.viewing.as_deref() == Some(filename) {
            return;
        }
        self.end_viewing();
        if !self.is_read(filename) {
            self.viewing = Some(filename.to_string());
        }
    }

    /// Viewing → Read for whatever record is being viewed.
    pub fn end_viewing(&mut self) {
        if let Some(filename) = self.viewing.take() {
            self.read.insert(filename);
        }
    }

    // -----------------------------------------------------------------------
    // Reconciliation
    // -----------------------------------------------------------------------

    /// Intersect both sets with the filenames of the latest scan.
    pub fn prune(&mut self, live: &HashSet<String>) {
        let before = (self.read.len(), self.important.len());
        self.read.retain(|f| live.contains(f));
        self.important.retain(|f| live.contains(f));
        if self.viewing.as_ref().is_some_and(|f| !live.contains(f)) {
            self.viewing = None;
        }
        tracing::debug!(
            read_pruned = before.0 - self.read.len(),
            important_pruned = before.1 - self.important.len(),
            "flag state pruned"
        );
    }

    /// Drop every trace of a deleted record.
    pub fn forget(&mut self, filename: &str) {
        self.read.remove(filename);
        self.important.remove(filename);
        if self.viewing.as_deref() == Some(filename) {
            self.viewing = None;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
