//! Error kinds raised by the elog engine.
//!
//! None of these is fatal to a batch: scanning, loading and rendering report
//! a failure for one file and carry on with the rest.

use std::path::PathBuf;

pub type Result<T, E = ElogError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ElogError {
    /// The scan root (or a directory below it) could not be read.
    #[error("cannot scan {}: {source}", path.display())]
    ScanIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension is not one of `.log`, `.gz`, `.bz2`.
    #[error("unsupported elog format {extension:?} for {}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// The file vanished or became unreadable between scan and read.
    #[error("cannot open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The basename matches neither accepted filename layout.
    #[error("cannot decode elog filename {name:?}: {reason}")]
    FilenameParse { name: String, reason: String },

    /// Removing the underlying file failed; no state was changed.
    #[error("cannot delete {}: {source}", path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ElogError {
    pub(crate) fn filename(name: &str, reason: impl Into<String>) -> Self {
        ElogError::FilenameParse {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
