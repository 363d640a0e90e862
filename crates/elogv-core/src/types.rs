//! Core types for elogv-core.
//!
//! This module defines the data structures shared across all engine layers:
//! the [`Severity`] lattice, the closed [`Stage`] vocabulary, parsed
//! [`Section`]s, and the [`ElogRecord`] built for every scanned file.

use chrono::NaiveDateTime;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Elog message class, ordered from least to most severe.
///
/// The derived `Ord` is the classification rank: `Error > Warn > Log > Info`.
/// `Info` doubles as the "no marker found" default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    #[default]
    Info,
    Log,
    Warn,
    Error,
}

impl Severity {
    /// All classes, most severe first.
    pub const ALL: [Severity; 4] = [
        Severity::Error,
        Severity::Warn,
        Severity::Log,
        Severity::Info,
    ];

    /// Capitalised label used in rendered headings.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Log => "Log",
            Severity::Warn => "Warn",
            Severity::Error => "Error",
        }
    }

    /// CSS colour for paragraphs of this class. `None` keeps the default
    /// text colour.
    pub fn color(&self) -> Option<&'static str> {
        match self {
            Severity::Error => Some("red"),
            Severity::Warn => Some("darkorange"),
            Severity::Info => Some("darkgreen"),
            Severity::Log => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Log => write!(f, "log"),
            Severity::Warn => write!(f, "warn"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Error returned when a class or stage name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} {name:?}")]
pub struct UnknownName {
    kind: &'static str,
    name: String,
}

impl std::str::FromStr for Severity {
    type Err = UnknownName;

    /// Case-insensitive; accepts `warning` for `warn`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "log" => Ok(Severity::Log),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            _ => Err(UnknownName {
                kind: "class",
                name: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// Package lifecycle phase a section was logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Preinst,
    Postinst,
    Prerm,
    Postrm,
    Unpack,
    Compile,
    Setup,
    Test,
    Install,
    Prepare,
    Configure,
    Other,
    Qa,
    Unclassified,
}

impl Stage {
    pub const ALL: [Stage; 14] = [
        Stage::Preinst,
        Stage::Postinst,
        Stage::Prerm,
        Stage::Postrm,
        Stage::Unpack,
        Stage::Compile,
        Stage::Setup,
        Stage::Test,
        Stage::Install,
        Stage::Prepare,
        Stage::Configure,
        Stage::Other,
        Stage::Qa,
        Stage::Unclassified,
    ];

    /// The stage name exactly as Portage writes it.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Preinst => "preinst",
            Stage::Postinst => "postinst",
            Stage::Prerm => "prerm",
            Stage::Postrm => "postrm",
            Stage::Unpack => "unpack",
            Stage::Compile => "compile",
            Stage::Setup => "setup",
            Stage::Test => "test",
            Stage::Install => "install",
            Stage::Prepare => "prepare",
            Stage::Configure => "configure",
            Stage::Other => "other",
            Stage::Qa => "QA",
            Stage::Unclassified => "unclassified",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Stage {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownName {
                kind: "stage",
                name: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// A recognised `<CLASS>: <stage>` header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionHeader {
    pub class: Severity,
    pub stage: Stage,
}

/// A contiguous run of text under one header.
///
/// `header` is `None` only for the implicit preamble, i.e. the lines that
/// precede the first header in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub header: Option<SectionHeader>,
    /// Accumulated lines, each terminated by `\n`.
    pub text: String,
}

impl Section {
    pub fn preamble() -> Self {
        Self {
            header: None,
            text: String::new(),
        }
    }

    pub fn new(class: Severity, stage: Stage) -> Self {
        Self {
            header: Some(SectionHeader { class, stage }),
            text: String::new(),
        }
    }

    pub fn push_line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// The identity fields encoded in an elog filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElogName {
    pub category: String,
    pub package: String,
    pub timestamp: NaiveDateTime,
}

/// Whether a record's content is the real file body or a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentStatus {
    Loaded,
    /// The extension is outside `.log`, `.gz`, `.bz2`.
    UnsupportedFormat(String),
    /// The file vanished or could not be read after the scan.
    Unreadable(String),
}

/// One elog file, built fresh on every scan pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ElogRecord {
    /// Identity key: the path relative to the scan root, `/`-separated.
    pub filename: String,
    /// Absolute (or root-joined) path on disk.
    pub path: PathBuf,
    pub category: String,
    pub package: String,
    pub timestamp: NaiveDateTime,
    /// Highest class marker found in `content`.
    pub severity: Severity,
    pub sections: Vec<Section>,
    /// Decoded file body, or placeholder text when `status` is not `Loaded`.
    pub content: String,
    pub status: ContentStatus,
}

impl ElogRecord {
    /// Assemble a record from a decoded name and (possibly placeholder) content.
    /// Classification and section parsing happen here.
    pub fn new(
        filename: impl Into<String>,
        path: impl Into<PathBuf>,
        name: ElogName,
        content: String,
        status: ContentStatus,
    ) -> Self {
        let severity = crate::severity::classify(&content);
        let sections = crate::parser::parse(&content);
        Self {
            filename: filename.into(),
            path: path.into(),
            category: name.category,
            package: name.package,
            timestamp: name.timestamp,
            severity,
            sections,
            content,
            status,
        }
    }

    /// `category/package` atom.
    pub fn atom(&self) -> String {
        format!("{}/{}", self.category, self.package)
    }

    /// Sortable display time, `YYYY-MM-DD HH:MM:SS`.
    pub fn sorted_time(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Flat per-record tuple for tabular display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRow {
    pub filename: String,
    pub category: String,
    pub package: String,
    pub severity: Severity,
    pub timestamp: NaiveDateTime,
    pub read: bool,
    pub important: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
