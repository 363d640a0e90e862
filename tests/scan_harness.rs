#![allow(unused)]
//! Scanner and loader integration harness.
//!
//! # What this covers
//!
//! - **Both layouts**: flat `<category>:<package>:<ts>` files at the root and
//!   `<category>/<package>:<ts>` files one level down are both found.
//! - **Order**: root files come first, then each category directory's files,
//!   every group in lexicographic order.
//! - **Filtering**: files without a `:` (e.g. `summary.log`) and anything
//!   deeper than one directory are ignored.
//! - **Containers**: `.log`, `.gz` and `.bz2` bodies decode to the same text.
//! - **Placeholders**: unsupported extensions produce a placeholder record
//!   instead of an error.
//! - **Missing root**: scanning a directory that does not exist yields
//!   nothing and reports nothing.
//!
//! # What this does NOT cover
//!
//! - Unreadable directories (permission bits are ignored when running as root)
//! - Symlink loops (links are never followed)
//!
//! # Running
//!
//! ```sh
//! cargo test --test scan_harness
//! ```

mod common;
use common::*;
use elogv_core::{ContentStatus, Severity};
use elogv_feeds::{load_record, read_content, Scanner};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::PathBuf;

fn scanned(tree: &ElogTree) -> Vec<String> {
    Scanner::new(tree.root())
        .scan()
        .map(|p| elogv_feeds::file::relative_name(tree.root(), &p))
        .collect()
}

// ---------------------------------------------------------------------------
// Enumeration
// ---------------------------------------------------------------------------

#[test]
fn finds_flat_and_nested_layouts_in_order() {
    let tree = ElogTree::new()
        .flat("x11-libs:gtk:20230103-000000.log", BODY_LOG)
        .nested("sys-apps", "bar:20230102-080000.log", BODY_WARN_INFO)
        .flat("app-misc:foo:20230101-120000.log", BODY_ERROR);

    assert_eq!(
        scanned(&tree),
        vec![
            "app-misc:foo:20230101-120000.log",
            "x11-libs:gtk:20230103-000000.log",
            "sys-apps/bar:20230102-080000.log",
        ]
    );
}

#[test]
fn ignores_files_without_delimiter() {
    let tree = ElogTree::new()
        .flat("summary.log", "not an elog\n")
        .flat("app-misc:foo:20230101-120000.log", BODY_ERROR);

    assert_eq!(scanned(&tree), vec!["app-misc:foo:20230101-120000.log"]);
}

#[test]
fn ignores_files_deeper_than_one_directory() {
    let tree = ElogTree::new().nested("sys-apps/deep", "bar:20230102-080000.log", BODY_LOG);
    assert!(scanned(&tree).is_empty());
}

#[test]
fn missing_root_yields_nothing() {
    let mut scan = Scanner::new(PathBuf::from("/nonexistent/elogv/elog")).scan();
    assert_eq!(scan.by_ref().count(), 0);
    assert!(scan.take_errors().is_empty());
}

#[test]
fn every_scan_walks_afresh() {
    let tree = ElogTree::new().flat("app-misc:foo:20230101-120000.log", BODY_ERROR);
    let scanner = Scanner::new(tree.root());
    assert_eq!(scanner.scan().count(), 1);

    write_elog(&tree.path("app-misc:foo:20230102-120000.log"), BODY_LOG);
    assert_eq!(scanner.scan().count(), 2);
}

// ---------------------------------------------------------------------------
// Containers
// ---------------------------------------------------------------------------

#[rstest]
#[case::plain("app-misc:foo:20230101-120000.log")]
#[case::gzip("app-misc:foo:20230101-120000.log.gz")]
#[case::bzip2("app-misc:foo:20230101-120000.log.bz2")]
fn containers_decode_to_same_text(#[case] name: &str) {
    let tree = ElogTree::new().flat(name, BODY_MIXED);
    assert_eq!(read_content(&tree.path(name)).unwrap(), BODY_MIXED);
}

#[rstest]
#[case::gzip("bar:20230102-080000.log.gz")]
#[case::bzip2("bar:20230102-080000.log.bz2")]
fn nested_compressed_record_is_fully_built(#[case] name: &str) {
    let tree = ElogTree::new().nested("sys-apps", name, BODY_WARN_INFO);
    let path = tree.root().join("sys-apps").join(name);

    let record = load_record(tree.root(), &path).unwrap();
    assert_eq!(record.filename, format!("sys-apps/{name}"));
    assert_eq!(record.atom(), "sys-apps/bar");
    assert_eq!(record.sorted_time(), "2023-01-02 08:00:00");
    assert_eq!(record.severity, Severity::Warn);
    assert_eq!(record.sections.len(), 2);
    assert_eq!(record.status, ContentStatus::Loaded);
}

// ---------------------------------------------------------------------------
// Placeholders
// ---------------------------------------------------------------------------

#[test]
fn unsupported_extension_becomes_placeholder() {
    let name = "app-misc:foo:20230101-120000.txt";
    let tree = ElogTree::new().flat(name, BODY_ERROR);

    let record = load_record(tree.root(), &tree.path(name)).unwrap();
    assert_eq!(record.status, ContentStatus::UnsupportedFormat("txt".into()));
    assert_eq!(record.content, "Unsupported format, cannot display .txt files.");
    assert_eq!(record.severity, Severity::Info);
}

#[test]
fn corrupt_gzip_becomes_unreadable_placeholder() {
    let name = "app-misc:foo:20230101-120000.log.gz";
    let tree = ElogTree::new().raw(name, b"definitely not gzip");

    let record = load_record(tree.root(), &tree.path(name)).unwrap();
    assert!(matches!(record.status, ContentStatus::Unreadable(_)));
    assert!(record.content.starts_with("This elog could not be read"));
    assert_eq!(record.severity, Severity::Info);
}

#[test]
fn undecodable_name_is_an_error() {
    let name = "a:b:c:d.log";
    let tree = ElogTree::new().flat(name, BODY_ERROR);
    assert!(load_record(tree.root(), &tree.path(name)).is_err());
}
