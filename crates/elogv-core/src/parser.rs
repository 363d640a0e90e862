//! Content parser — splits a decoded elog body into ordered [`Section`]s.
//!
//! Portage's `save` elog module writes one header line per message group:
//!
//! ```text
//! ERROR: postinst
//! something failed
//! WARN: compile
//! ...
//! ```
//!
//! A header is `<CLASS>: <stage>` with CLASS in {LOG, INFO, WARN, ERROR}
//! (any case) and stage in the closed [`Stage`] set. Lines before the first
//! header form an untagged preamble. A line that looks like a header but
//! names an unknown class or stage is kept as ordinary content.

use crate::types::{Section, Severity, Stage};
use phf::phf_map;

static CLASSES: phf::Map<&'static str, Severity> = phf_map! {
    "LOG" => Severity::Log,
    "INFO" => Severity::Info,
    "WARN" => Severity::Warn,
    "ERROR" => Severity::Error,
};

static STAGES: phf::Map<&'static str, Stage> = phf_map! {
    "preinst" => Stage::Preinst,
    "postinst" => Stage::Postinst,
    "prerm" => Stage::Prerm,
    "postrm" => Stage::Postrm,
    "unpack" => Stage::Unpack,
    "compile" => Stage::Compile,
    "setup" => Stage::Setup,
    "test" => Stage::Test,
    "install" => Stage::Install,
    "prepare" => Stage::Prepare,
    "configure" => Stage::Configure,
    "other" => Stage::Other,
    "QA" => Stage::Qa,
    "unclassified" => Stage::Unclassified,
};

/// Recognise a `<CLASS>: <stage>` header line.
pub fn parse_header(line: &str) -> Option<(Severity, Stage)> {
    let (class, stage) = line.split_once(": ")?;
    let class = CLASSES.get(class.to_ascii_uppercase().as_str())?;
    let stage = STAGES.get(stage.trim_end())?;
    Some((*class, *stage))
}

fn is_unknown_stage_header(line: &str) -> bool {
    line.split_once(": ")
        .is_some_and(|(class, _)| CLASSES.contains_key(class.to_ascii_uppercase().as_str()))
}

/// Split `content` into sections in file order.
///
/// Empty content yields no sections; a preamble is only produced when at
/// least one line precedes the first header.
pub fn parse(content: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();

    for line in content.lines() {
        if let Some((class, stage)) = parse_header(line) {
            sections.push(Section::new(class, stage));
            continue;
        }
        if is_unknown_stage_header(line) {
            tracing::trace!(line, "unknown elog stage kept as content");
        }
        match sections.last_mut() {
            Some(open) => open.push_line(line),
            None => {
                let mut preamble = Section::preamble();
                preamble.push_line(line);
                sections.push(preamble);
            }
        }
    }

    sections
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
