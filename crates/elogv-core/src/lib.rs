//! elogv-core — engine for browsing Portage elog files.
//!
//! This crate holds every piece that does not touch the elog directory
//! itself: decoding filenames, parsing and classifying content, rendering
//! HTML, and reconciling the persisted read/important flags.
//!
//! # Architecture
//!
//! ```text
//! Scanner ──► Decoder ──► Parser / Classifier ──► Renderer
//! (feeds)     filename    parser, severity        render
//!
//! StateStore (state + settings): keyed by filename, pruned every scan
//! ```
//!
//! Everything runs synchronously on the caller's thread.

pub mod config;
pub mod error;
pub mod filename;
pub mod parser;
pub mod render;
pub mod settings;
pub mod severity;
pub mod state;
pub mod types;

pub use error::{ElogError, Result};
pub use render::{HtmlRenderer, SectionFilter};
pub use state::{ReadState, StateStore};
pub use types::{
    ContentStatus, ElogName, ElogRecord, RecordRow, Section, SectionHeader, Severity, Stage,
};
