//! HTML renderer — turns parsed sections into a colourised, hyperlinked
//! fragment for the detail pane.
//!
//! Rendering happens in two phases:
//!
//! 1. **Emission**: an `<h1>` title, then for every section a `<h2>` heading
//!    (`Error: postinst`) and a paragraph coloured by its class. Content is
//!    HTML-escaped and each line ends with `<br />`.
//! 2. **Post-processing**, in this order:
//!    1. strip ANSI escape sequences,
//!    2. link bare `http`/`https`/`ftp` URLs,
//!    3. link `bug #<n>` to the Gentoo bug tracker,
//!    4. link `category/package` atoms to the package browser.
//!
//!    Passes 2–4 only rewrite text outside existing markup, so a later pass
//!    never re-links an anchor produced by an earlier one.
//!
//! The output depends only on the inputs: the same record and filter always
//! render to the same bytes.

use crate::types::{ElogRecord, Section, SectionHeader, Severity, Stage};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt::Write as _;

pub const BUG_URL: &str = "https://bugs.gentoo.org/";
pub const PACKAGE_URL: &str = "https://packages.gentoo.org/packages/";

// CSI (with intermediates), OSC ended by BEL or ST, charset selection and
// the remaining two-byte escapes.
static ANSI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\x1b(?:\[[0-?]*[ -/]*[@-~]|\][^\x07\x1b]*(?:\x07|\x1b\\)|[()][0-9A-Za-z]|[@-Z\\-_])",
    )
    .expect("ANSI pattern must compile")
});

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:https?|ftp)://(?:[^\s<>"&]|&amp;)+"#).expect("URL pattern must compile")
});

static BUG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[Bb]ug\s+#([0-9]+)").expect("bug pattern must compile"));

// Heuristic: over- and under-matches real atoms; purely cosmetic. The
// trailing boundary is checked by `link_atoms` so the whitespace after one
// atom can still lead the next.
static ATOM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s([a-z1]+-[a-z0-9]+/[a-z0-9_+-]+)").expect("atom pattern must compile")
});

const ATOM_TAIL: &[char] = &[',', '.', ':', ';', '!', '?'];

static MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<a\s[^>]*>.*?</a>|<[^>]*>").expect("markup pattern must compile")
});

// ---------------------------------------------------------------------------
// Section filter
// ---------------------------------------------------------------------------

/// Class and stage toggles deciding which sections are rendered.
///
/// The untagged preamble is always rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFilter {
    classes: BTreeSet<Severity>,
    stages: BTreeSet<Stage>,
}

impl Default for SectionFilter {
    fn default() -> Self {
        Self {
            classes: Severity::ALL.into_iter().collect(),
            stages: Stage::ALL.into_iter().collect(),
        }
    }
}

impl SectionFilter {
    /// Restrict rendering to the given classes.
    pub fn classes(mut self, classes: impl IntoIterator<Item = Severity>) -> Self {
        self.classes = classes.into_iter().collect();
        self
    }

    /// Restrict rendering to the given stages.
    pub fn stages(mut self, stages: impl IntoIterator<Item = Stage>) -> Self {
        self.stages = stages.into_iter().collect();
        self
    }

    pub fn set_class(&mut self, class: Severity, enabled: bool) {
        if enabled {
            self.classes.insert(class);
        } else {
            self.classes.remove(&class);
        }
    }

    pub fn set_stage(&mut self, stage: Stage, enabled: bool) {
        if enabled {
            self.stages.insert(stage);
        } else {
            self.stages.remove(&stage);
        }
    }

    pub fn allows(&self, header: &SectionHeader) -> bool {
        self.classes.contains(&header.class) && self.stages.contains(&header.stage)
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    filter: SectionFilter,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: SectionFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> &SectionFilter {
        &self.filter
    }

    pub fn render_record(&self, record: &ElogRecord) -> String {
        self.render(&record.category, &record.package, &record.sections)
    }

    /// Render `sections` under a `category/package` title.
    pub fn render(&self, category: &str, package: &str, sections: &[Section]) -> String {
        let html = self.emit(category, package, sections);
        let html = strip_ansi(&html);
        let html = outside_markup(&html, link_urls);
        let html = outside_markup(&html, link_bugs);
        outside_markup(&html, link_atoms)
    }

    fn emit(&self, category: &str, package: &str, sections: &[Section]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "<h1>{}/{}</h1>", escape(category), escape(package));

        let mut paragraph_open = false;
        for section in sections {
            match &section.header {
                Some(header) if !self.filter.allows(header) => continue,
                Some(header) => {
                    if paragraph_open {
                        out.push_str("</p>\n");
                    }
                    let _ = writeln!(out, "<h2>{}: {}</h2>", header.class.label(), header.stage);
                    match header.class.color() {
                        Some(color) => {
                            let _ = writeln!(out, "<p style=\"color: {color}\">");
                        }
                        None => out.push_str("<p>\n"),
                    }
                    paragraph_open = true;
                }
                None => {
                    if !paragraph_open {
                        out.push_str("<p>\n");
                        paragraph_open = true;
                    }
                }
            }
            for line in section.text.lines() {
                out.push_str(&escape(line));
                out.push_str("<br />\n");
            }
        }
        if paragraph_open {
            out.push_str("</p>\n");
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Passes
// ---------------------------------------------------------------------------

fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn strip_ansi(html: &str) -> Cow<'_, str> {
    ANSI.replace_all(html, "")
}

fn link_urls(text: &str) -> Cow<'_, str> {
    URL.replace_all(text, |c: &Captures| format!("<a href=\"{0}\">{0}</a>", &c[0]))
}

fn link_bugs(text: &str) -> Cow<'_, str> {
    BUG.replace_all(text, |c: &Captures| {
        format!("<a href=\"{BUG_URL}{}\">{}</a>", &c[1], &c[0])
    })
}

fn link_atoms(text: &str) -> Cow<'_, str> {
    let mut out = String::new();
    let mut last = 0;
    for c in ATOM.captures_iter(text) {
        let Some(atom) = c.get(1) else { continue };
        let bounded = text[atom.end()..]
            .chars()
            .next()
            .map_or(true, |t| t.is_whitespace() || ATOM_TAIL.contains(&t));
        if !bounded {
            continue;
        }
        out.push_str(&text[last..atom.start()]);
        let _ = write!(
            out,
            "<a href=\"{PACKAGE_URL}{atom}\">{atom}</a>",
            atom = atom.as_str()
        );
        last = atom.end();
    }
    if last == 0 {
        return Cow::Borrowed(text);
    }
    out.push_str(&text[last..]);
    Cow::Owned(out)
}

/// Apply `pass` to every stretch of text between tags, leaving tags and
/// whole `<a>…</a>` elements untouched.
fn outside_markup(html: &str, pass: impl Fn(&str) -> Cow<'_, str>) -> String {
    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    for m in MARKUP.find_iter(html) {
        out.push_str(&pass(&html[last..m.start()]));
        out.push_str(m.as_str());
        last = m.end();
    }
    out.push_str(&pass(&html[last..]));
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
