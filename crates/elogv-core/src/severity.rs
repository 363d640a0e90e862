//! Severity classifier — the single highest class marker present in a record.
//!
//! Works on the raw body rather than parsed sections, so a header the parser
//! rejected still counts towards the record's severity.

use crate::types::Severity;

/// Markers in rank order, most severe first.
const MARKERS: [(&str, Severity); 4] = [
    ("ERROR:", Severity::Error),
    ("WARN:", Severity::Warn),
    ("LOG:", Severity::Log),
    ("INFO:", Severity::Info),
];

/// Highest-ranked marker among `ERROR:`, `WARN:`, `LOG:`, `INFO:` found in
/// `content`. Content without any marker is [`Severity::Info`].
pub fn classify(content: &str) -> Severity {
    MARKERS
        .iter()
        .find(|(marker, _)| content.contains(marker))
        .map(|(_, class)| *class)
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
