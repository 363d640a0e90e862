//! Collection scanner — enumerates elog files under the elog directory.
//!
//! Both Portage layouts are walked:
//!
//! ```text
//! <root>/<category>:<package>:<timestamp>.log[.ext]     depth 1
//! <root>/<category>/<package>:<timestamp>.log[.ext]     depth 2
//! ```
//!
//! At each level files come before directories, each group in lexicographic
//! order, so the flat layout is listed first and every category directory
//! follows with its files. Any file with a `:` in its name is yielded
//! whatever its extension; format problems surface later as placeholder
//! records.

use elogv_core::ElogError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Restartable source of elog paths; every [`Scanner::scan`] call walks the
/// directory afresh.
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start a lazy walk. A missing root yields an empty sequence.
    pub fn scan(&self) -> Scan {
        if !self.root.is_dir() {
            tracing::debug!(root = %self.root.display(), "elog directory does not exist");
            return Scan {
                walk: None,
                errors: Vec::new(),
            };
        }
        let walk = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(2)
            .follow_links(false)
            .sort_by(|a, b| {
                a.file_type()
                    .is_dir()
                    .cmp(&b.file_type().is_dir())
                    .then_with(|| a.file_name().cmp(b.file_name()))
            })
            .into_iter();
        Scan {
            walk: Some(walk),
            errors: Vec::new(),
        }
    }
}

/// One pass over the elog directory.
///
/// Unreadable directories are skipped with a warning; the errors are kept
/// and can be collected with [`Scan::take_errors`].
pub struct Scan {
    walk: Option<walkdir::IntoIter>,
    errors: Vec<ElogError>,
}

impl Scan {
    pub fn take_errors(&mut self) -> Vec<ElogError> {
        std::mem::take(&mut self.errors)
    }
}

impl Iterator for Scan {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let entry = match self.walk.as_mut()?.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    tracing::warn!(path = %path.display(), error = %e, "cannot scan");
                    self.errors.push(ElogError::ScanIo {
                        path,
                        source: e.into(),
                    });
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            if !entry.file_name().to_string_lossy().contains(':') {
                tracing::debug!(path = %entry.path().display(), "not an elog file, skipped");
                continue;
            }
            return Some(entry.into_path());
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
