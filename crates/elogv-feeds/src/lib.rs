//! elogv-feeds — elog file sources for elogv.
//!
//! [`scan::Scanner`] walks the elog directory and yields candidate paths;
//! [`file::load_record`] turns one path into an [`elogv_core::ElogRecord`],
//! decompressing `.gz`/`.bz2` containers on the way.

pub mod file;
pub mod scan;

pub use file::{load_record, read_content, ElogFormat};
pub use scan::{Scan, Scanner};
