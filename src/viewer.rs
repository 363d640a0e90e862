//! Viewer session — the record set, the selection and the flag store, driven
//! by discrete user actions.
//!
//! Every action runs to completion on the caller's thread. The only deferred
//! work is the FIFO queue filled by [`Viewer::defer`], which front-ends use to
//! show their window before the first (possibly slow) scan.

use elogv_core::settings::SettingsStore;
use elogv_core::{
    ElogError, ElogRecord, HtmlRenderer, ReadState, RecordRow, SectionFilter, StateStore,
};
use elogv_feeds::{load_record, Scanner};
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;

type Deferred = Box<dyn FnOnce(&mut Viewer)>;

/// Outcome of one scan cycle.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Records built in this pass, placeholders included.
    pub loaded: usize,
    /// Per-file failures (undecodable names, unreadable directories). None of
    /// them stopped the scan; whether to surface them is up to the caller.
    pub errors: Vec<ElogError>,
}

pub struct Viewer {
    scanner: Scanner,
    records: Vec<ElogRecord>,
    state: StateStore,
    selected: Option<String>,
    renderer: HtmlRenderer,
    deferred: VecDeque<Deferred>,
}

impl Viewer {
    pub fn new(root: impl Into<PathBuf>, state: StateStore) -> Self {
        Self {
            scanner: Scanner::new(root),
            records: Vec::new(),
            state,
            selected: None,
            renderer: HtmlRenderer::new(),
            deferred: VecDeque::new(),
        }
    }

    /// Start a session with flags loaded from `settings`. No scan happens yet.
    pub fn open(root: impl Into<PathBuf>, settings: &dyn SettingsStore) -> anyhow::Result<Self> {
        Ok(Self::new(root, StateStore::load(settings)?))
    }

    // -----------------------------------------------------------------------
    // Scan cycle
    // -----------------------------------------------------------------------

    /// Rebuild the record set from disk and prune flags of vanished files.
    pub fn refresh(&mut self) -> ScanReport {
        let mut report = ScanReport::default();
        let mut records = Vec::new();

        let mut scan = self.scanner.scan();
        for path in scan.by_ref() {
            match load_record(self.scanner.root(), &path) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "elog skipped");
                    report.errors.push(e);
                }
            }
        }
        report.errors.extend(scan.take_errors());
        report.loaded = records.len();
        self.records = records;

        let live: HashSet<String> = self.records.iter().map(|r| r.filename.clone()).collect();
        self.state.prune(&live);
        if self.selected.as_ref().is_some_and(|f| !live.contains(f)) {
            self.selected = None;
        }

        tracing::info!(
            root = %self.scanner.root().display(),
            loaded = report.loaded,
            errors = report.errors.len(),
            "elog directory scanned"
        );
        report
    }

    pub fn records(&self) -> &[ElogRecord] {
        &self.records
    }

    pub fn record(&self, filename: &str) -> Option<&ElogRecord> {
        self.records.iter().find(|r| r.filename == filename)
    }

    /// Flat rows for tabular display, in scan order.
    pub fn rows(&self) -> Vec<RecordRow> {
        self.records
            .iter()
            .map(|r| RecordRow {
                filename: r.filename.clone(),
                category: r.category.clone(),
                package: r.package.clone(),
                severity: r.severity,
                timestamp: r.timestamp,
                read: self.state.is_read(&r.filename),
                important: self.state.is_important(&r.filename),
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Flags
    // -----------------------------------------------------------------------

    pub fn state(&self) -> &StateStore {
        &self.state
    }

    pub fn read_state(&self, filename: &str) -> ReadState {
        self.state.read_state(filename)
    }

    pub fn unread_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| !self.state.is_read(&r.filename))
            .count()
    }

    pub fn important_count(&self) -> usize {
        self.state.important_count()
    }

    /// Mark a record read or unread, skipping the viewing state. Returns
    /// `false` for filenames not in the current record set.
    pub fn set_read(&mut self, filename: &str, read: bool) -> bool {
        if self.record(filename).is_none() {
            return false;
        }
        self.state.set_read(filename, read);
        true
    }

    pub fn set_important(&mut self, filename: &str, important: bool) -> bool {
        if self.record(filename).is_none() {
            return false;
        }
        self.state.set_important(filename, important);
        true
    }

    pub fn mark_all_read(&mut self) {
        for record in &self.records {
            self.state.set_read(&record.filename, true);
        }
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    pub fn selected(&self) -> Option<&ElogRecord> {
        self.selected.as_deref().and_then(|f| self.record(f))
    }

    /// Move the selection and render the newly selected record.
    ///
    /// The outgoing record finishes viewing (becomes read) before the
    /// incoming one starts viewing, and both happen before rendering.
    pub fn select(&mut self, filename: Option<&str>) -> Option<String> {
        if let Some(f) = filename {
            if self.record(f).is_none() {
                tracing::warn!(filename = f, "cannot select unknown elog");
                return None;
            }
        }
        if self.selected.as_deref() != filename {
            self.state.end_viewing();
            self.selected = filename.map(str::to_string);
            if let Some(f) = filename {
                self.state.begin_viewing(f);
            }
        }
        self.render_selected()
    }

    pub fn render_selected(&self) -> Option<String> {
        self.selected().map(|r| self.renderer.render_record(r))
    }

    pub fn set_filter(&mut self, filter: SectionFilter) {
        self.renderer = HtmlRenderer::with_filter(filter);
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    /// Remove the file and every trace of the record. If the file cannot be
    /// removed nothing changes.
    pub fn delete(&mut self, filename: &str) -> Result<(), ElogError> {
        let index = self
            .records
            .iter()
            .position(|r| r.filename == filename)
            .ok_or_else(|| ElogError::Delete {
                path: PathBuf::from(filename),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such elog"),
            })?;

        let path = self.records[index].path.clone();
        std::fs::remove_file(&path).map_err(|source| ElogError::Delete {
            path: path.clone(),
            source,
        })?;

        self.records.remove(index);
        self.state.forget(filename);
        if self.selected.as_deref() == Some(filename) {
            self.selected = None;
        }
        tracing::info!(path = %path.display(), "elog deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Queue work to run once the front-end is up, first-in first-out.
    pub fn defer(&mut self, job: impl FnOnce(&mut Viewer) + 'static) {
        self.deferred.push_back(Box::new(job));
    }

    /// Run queued jobs, including any they queue themselves. Returns how many ran.
    pub fn run_deferred(&mut self) -> usize {
        let mut ran = 0;
        while let Some(job) = self.deferred.pop_front() {
            job(self);
            ran += 1;
        }
        ran
    }

    pub fn save(&self, settings: &mut dyn SettingsStore) -> anyhow::Result<()> {
        self.state.save(settings)
    }

    /// End the session: the viewed record becomes read and flags are saved.
    pub fn close(mut self, settings: &mut dyn SettingsStore) -> anyhow::Result<()> {
        self.select(None);
        self.save(settings)
    }
}
