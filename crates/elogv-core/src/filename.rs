//! Filename decoder — extracts category, package and timestamp from an elog path.
//!
//! Two layouts are accepted:
//!
//! ```text
//! <root>/<category>:<package>:<YYYYMMDD-HHMMSS>.log[.ext]
//! <root>/<category>/<package>:<YYYYMMDD-HHMMSS>.log[.ext]
//! ```
//!
//! In the second form the category comes from the parent directory name.

use crate::error::{ElogError, Result};
use crate::types::ElogName;
use chrono::NaiveDateTime;
use std::path::Path;

const DELIMITER: char = ':';
const TIMESTAMP_LEN: usize = 15;
const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Decode the identity fields of an elog file from its path.
pub fn decode(path: &Path) -> Result<ElogName> {
    let basename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ElogError::filename(&path.display().to_string(), "no UTF-8 basename"))?;
    let parent = path
        .parent()
        .and_then(Path::file_name)
        .and_then(|n| n.to_str());
    decode_name(basename, parent)
}

/// Decode a bare basename. `parent` is the immediate parent directory name,
/// used as the category for the two-field layout.
pub fn decode_name(basename: &str, parent: Option<&str>) -> Result<ElogName> {
    let fields: Vec<&str> = basename.split(DELIMITER).collect();
    let (category, package, stamp) = match fields.as_slice() {
        [category, package, stamp] => (*category, *package, *stamp),
        [package, stamp] => {
            let category = parent
                .ok_or_else(|| ElogError::filename(basename, "no category directory"))?;
            (category, *package, *stamp)
        }
        _ => {
            return Err(ElogError::filename(
                basename,
                format!("expected 2 or 3 ':'-separated fields, found {}", fields.len()),
            ))
        }
    };

    if category.is_empty() || package.is_empty() {
        return Err(ElogError::filename(basename, "empty category or package"));
    }

    Ok(ElogName {
        category: category.to_string(),
        package: package.to_string(),
        timestamp: parse_timestamp(basename, stamp)?,
    })
}

/// Parse the leading `YYYYMMDD-HHMMSS` of the last field. Anything after the
/// 15 characters (`.log`, `.log.gz`, ...) is ignored here.
fn parse_timestamp(basename: &str, stamp: &str) -> Result<NaiveDateTime> {
    let head = stamp
        .get(..TIMESTAMP_LEN)
        .ok_or_else(|| ElogError::filename(basename, "timestamp too short"))?;

    let shape_ok = head.bytes().enumerate().all(|(i, b)| match i {
        8 => b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return Err(ElogError::filename(
            basename,
            format!("timestamp {head:?} is not YYYYMMDD-HHMMSS"),
        ));
    }

    NaiveDateTime::parse_from_str(head, TIMESTAMP_FORMAT)
        .map_err(|e| ElogError::filename(basename, format!("invalid timestamp {head:?}: {e}")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;
    use std::path::PathBuf;

    fn noon_new_year() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn flat_layout() {
        let name = decode(Path::new("/var/log/portage/elog/app-misc:foo:20230101-120000.log")).unwrap();
        assert_eq!(name.category, "app-misc");
        assert_eq!(name.package, "foo");
        assert_eq!(name.timestamp, noon_new_year());
    }

    #[test]
    fn nested_layout_takes_category_from_parent() {
        let path: PathBuf = ["elog", "dev-lang", "rust-1.75.0:20230101-120000.log.gz"]
            .iter()
            .collect();
        let name = decode(&path).unwrap();
        assert_eq!(name.category, "dev-lang");
        assert_eq!(name.package, "rust-1.75.0");
        assert_eq!(name.timestamp, noon_new_year());
    }

    #[rstest]
    #[case::plain("x:y:20230101-120000.log")]
    #[case::gzip("x:y:20230101-120000.log.gz")]
    #[case::bzip2("x:y:20230101-120000.log.bz2")]
    #[case::unknown("x:y:20230101-120000.txt")]
    fn extension_does_not_affect_decoding(#[case] basename: &str) {
        let name = decode_name(basename, None).unwrap();
        assert_eq!(name.timestamp, noon_new_year());
    }

    #[rstest]
    #[case::no_delimiter("summary.log")]
    #[case::too_many_fields("a:b:c:20230101-120000.log")]
    #[case::bad_shape("a:b:2023-01-01T12.log")]
    #[case::too_short("a:b:2023.log")]
    #[case::impossible_date("a:b:20231301-120000.log")]
    #[case::empty_package("a::20230101-120000.log")]
    fn rejects_malformed_names(#[case] basename: &str) {
        let err = decode_name(basename, Some("cat")).unwrap_err();
        assert!(matches!(err, ElogError::FilenameParse { .. }), "{err}");
    }

    #[test]
    fn two_fields_without_parent_is_an_error() {
        assert!(decode_name("foo:20230101-120000.log", None).is_err());
    }
}
