//! Test builders — an on-disk elog directory and ready-made viewer sessions.
//!
//! These builders are designed for readability in test setup, not for
//! production use. They panic on I/O errors rather than returning `Result`.

use elogv::Viewer;
use elogv_core::settings::MemorySettings;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// ElogTree
// ---------------------------------------------------------------------------

/// A temporary elog directory populated file by file.
///
/// # Example
///
/// ```rust
/// let tree = ElogTree::new()
///     .flat("app-misc:foo:20230101-120000.log", BODY_ERROR)
///     .nested("sys-apps", "bar:20230102-080000.log.gz", BODY_WARN_INFO);
/// let viewer = tree.viewer();
/// ```
pub struct ElogTree {
    dir: TempDir,
}

impl Default for ElogTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ElogTree {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp elog dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write `<root>/<name>`, compressing according to its extension.
    pub fn flat(self, name: &str, body: &str) -> Self {
        write_elog(&self.dir.path().join(name), body);
        self
    }

    /// Write `<root>/<category>/<name>`.
    pub fn nested(self, category: &str, name: &str, body: &str) -> Self {
        let dir = self.dir.path().join(category);
        fs::create_dir_all(&dir).expect("create category dir");
        write_elog(&dir.join(name), body);
        self
    }

    /// Write a file without going through any compression, whatever its name.
    pub fn raw(self, name: &str, bytes: &[u8]) -> Self {
        fs::write(self.dir.path().join(name), bytes).expect("write raw file");
        self
    }

    /// A scanned viewer over this tree with empty flags.
    pub fn viewer(&self) -> Viewer {
        let mut viewer = Viewer::open(self.root(), &MemorySettings::default())
            .expect("open viewer on memory settings");
        viewer.refresh();
        viewer
    }
}

/// Write an elog body to `path`: `.gz` and `.bz2` are compressed, anything
/// else is written verbatim.
pub fn write_elog(path: &Path, body: &str) {
    let file = File::create(path).expect("create elog file");
    match path.extension().and_then(|e| e.to_str()) {
        Some("gz") => {
            let mut enc = flate2::write::GzEncoder::new(file, flate2::Compression::default());
            enc.write_all(body.as_bytes()).expect("gzip elog");
            enc.finish().expect("finish gzip");
        }
        Some("bz2") => {
            let mut enc = bzip2::write::BzEncoder::new(file, bzip2::Compression::default());
            enc.write_all(body.as_bytes()).expect("bzip2 elog");
            enc.finish().expect("finish bzip2");
        }
        _ => {
            let mut file = file;
            file.write_all(body.as_bytes()).expect("write elog");
        }
    }
}
