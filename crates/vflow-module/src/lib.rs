//! vFlow Module
//!
//! Handling of published module packages (`modules/*.zip`). A package is a
//! ZIP archive carrying a `manifest.json` somewhere inside it; the archive
//! itself is never modified.
//!
//! - [`read_manifest`] locates and parses the embedded manifest
//! - [`validate_manifest`] checks it against the archive filename
//! - [`ModuleScanner`] produces a [`ModuleEntry`] per valid package

mod archive;
mod entry;
mod manifest;
mod scanner;

pub use archive::{MAX_MANIFEST_SIZE, read_manifest};
pub use entry::ModuleEntry;
pub use manifest::{
  MANIFEST_FILENAME, MANIFEST_SCOPE, MODULE_EXTENSION, REQUIRED_MANIFEST_FIELDS, validate_manifest,
};
pub use scanner::ModuleScanner;
