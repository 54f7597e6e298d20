//! vFlow Index
//!
//! Shared building blocks for indexing a vFlow artifact repository:
//!
//! - [`Scanner`] and [`IndexEntry`], implemented by the workflow and module crates
//! - [`ScanReport`] and the per-file [`ScanError`] taxonomy
//! - identifier and required-field checks used by both validators
//! - [`IndexBuilder`], which sorts a scan and writes the directory's `index.json`

mod builder;
mod error;
mod scan;
mod validate;

pub use builder::{DEFAULT_INDEX_FILE, INDEX_SCHEMA_VERSION, IndexBuilder, IndexDocument, IndexReport};
pub use error::{FileError, IndexError, ScanError};
pub use scan::{
  IndexEntry, REPOSITORY_BASE_URL, ScanReport, Scanner, download_url, field_or, list_candidates,
};
pub use validate::{normalize_id, require_fields, require_matching_id};
