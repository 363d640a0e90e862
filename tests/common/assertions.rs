//! Domain-specific assertion macros for elogv harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* record broke *which* rule.

// ---------------------------------------------------------------------------
// Record assertions
// ---------------------------------------------------------------------------

/// Assert that the viewer holds a record for `filename` with the given
/// severity.
///
/// ```rust
/// assert_severity!(viewer, "app-misc:foo:20230101-120000.log", Severity::Error);
/// ```
#[macro_export]
macro_rules! assert_severity {
    ($viewer:expr, $filename:expr, $severity:expr) => {{
        let viewer: &elogv::Viewer = &$viewer;
        let filename: &str = $filename;
        match viewer.record(filename) {
            Some(record) => pretty_assertions::assert_eq!(
                record.severity,
                $severity,
                "assert_severity! failed for {:?}",
                filename
            ),
            None => panic!(
                "assert_severity! failed: no record {:?}.\n  Loaded: {:?}",
                filename,
                viewer
                    .records()
                    .iter()
                    .map(|r| r.filename.as_str())
                    .collect::<Vec<_>>()
            ),
        }
    }};
}

/// Assert the exact set of record filenames, in scan order.
#[macro_export]
macro_rules! assert_filenames {
    ($viewer:expr, [$($name:expr),* $(,)?]) => {{
        let viewer: &elogv::Viewer = &$viewer;
        let actual: Vec<&str> = viewer.records().iter().map(|r| r.filename.as_str()).collect();
        let expected: Vec<&str> = vec![$($name),*];
        pretty_assertions::assert_eq!(actual, expected, "assert_filenames! failed");
    }};
}

// ---------------------------------------------------------------------------
// Flag assertions
// ---------------------------------------------------------------------------

/// Assert the session read state of one record.
///
/// ```rust
/// assert_read_state!(viewer, A, ReadState::Viewing);
/// ```
#[macro_export]
macro_rules! assert_read_state {
    ($viewer:expr, $filename:expr, $state:expr) => {{
        let viewer: &elogv::Viewer = &$viewer;
        let filename: &str = $filename;
        let actual = viewer.read_state(filename);
        if actual != $state {
            panic!(
                "assert_read_state! failed for {:?}\n  expected: {:?}\n  actual:   {:?}\n  viewing:  {:?}",
                filename,
                $state,
                actual,
                viewer.state().viewing()
            );
        }
    }};
}

/// Assert the unread and important counters together.
#[macro_export]
macro_rules! assert_counts {
    ($viewer:expr, unread = $unread:expr, important = $important:expr) => {{
        let viewer: &elogv::Viewer = &$viewer;
        pretty_assertions::assert_eq!(
            (viewer.unread_count(), viewer.important_count()),
            ($unread, $important),
            "assert_counts! failed: (unread, important)"
        );
    }};
}
