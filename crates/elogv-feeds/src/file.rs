//! Elog file loader — format detection, decompression and record assembly.
//!
//! `.log` files are read as-is, `.gz` through `flate2` and `.bz2` through
//! `bzip2`. Anything else, and any file that cannot be read, becomes a
//! placeholder record instead of aborting the scan.

use elogv_core::{filename, ContentStatus, ElogError, ElogRecord};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Container format, chosen by the last extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElogFormat {
    Plain,
    Gzip,
    Bzip2,
}

impl ElogFormat {
    pub fn detect(path: &Path) -> Result<Self, ElogError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        match extension.as_str() {
            "log" => Ok(ElogFormat::Plain),
            "gz" => Ok(ElogFormat::Gzip),
            "bz2" => Ok(ElogFormat::Bzip2),
            _ => Err(ElogError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Read and decompress an elog file into text (lossy UTF-8).
pub fn read_content(path: &Path) -> Result<String, ElogError> {
    let format = ElogFormat::detect(path)?;
    let open_err = |source| ElogError::FileOpen {
        path: path.to_path_buf(),
        source,
    };

    let file = BufReader::new(File::open(path).map_err(open_err)?);
    let mut reader: Box<dyn Read> = match format {
        ElogFormat::Plain => Box::new(file),
        ElogFormat::Gzip => Box::new(flate2::read::MultiGzDecoder::new(file)),
        ElogFormat::Bzip2 => Box::new(bzip2::read::MultiBzDecoder::new(file)),
    };

    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(open_err)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Identity key of `path`: its location relative to `root`, `/`-separated.
pub fn relative_name(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Build the record for one scanned path.
///
/// Only a filename that cannot be decoded is an error; unreadable or
/// unsupported files yield a placeholder record.
pub fn load_record(root: &Path, path: &Path) -> Result<ElogRecord, ElogError> {
    let name = filename::decode(path)?;
    let (content, status) = match read_content(path) {
        Ok(content) => (content, ContentStatus::Loaded),
        Err(ElogError::UnsupportedFormat { extension, .. }) => {
            tracing::warn!(path = %path.display(), %extension, "unsupported elog format");
            (
                format!("Unsupported format, cannot display .{extension} files."),
                ContentStatus::UnsupportedFormat(extension),
            )
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read elog");
            (
                format!("This elog could not be read ({e})."),
                ContentStatus::Unreadable(e.to_string()),
            )
        }
    };
    Ok(ElogRecord::new(
        relative_name(root, path),
        path,
        name,
        content,
        status,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
