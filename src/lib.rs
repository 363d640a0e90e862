//! elogv — browse, classify and render Portage elog files.
//!
//! This crate ties the engine ([`elogv_core`]) and the filesystem side
//! ([`elogv_feeds`]) into a [`viewer::Viewer`] session, and ships the
//! `elogv` command-line front-end.
//!
//! # Architecture
//!
//! ```text
//! Scanner ──► Decoder ──► Parser / Classifier ──► Renderer
//!                                  │
//!             StateStore ◄─────────┘ (pruned every refresh)
//! ```
//!
//! Everything runs synchronously; there is no background scanning.

pub mod viewer;

pub use elogv_core::{
    ContentStatus, ElogError, ElogRecord, HtmlRenderer, ReadState, RecordRow, Section,
    SectionFilter, Severity, Stage, StateStore,
};
pub use viewer::{ScanReport, Viewer};
