//! Error types for scanning and indexing.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Why a single artifact file was rejected.
///
/// These never abort a scan: the file is recorded as skipped and the
/// scanner moves on to the next candidate.
#[derive(Debug, Error)]
pub enum ScanError {
  /// The workflow document has no `_meta` block.
  #[error("missing '_meta' block")]
  MissingMetadata,

  /// One or more required keys are absent from the metadata block or manifest.
  #[error("{scope} is missing required fields: {}", .fields.join(", "))]
  MissingRequiredFields {
    scope: &'static str,
    fields: Vec<String>,
  },

  /// The declared identifier differs from the filename-derived one.
  #[error("{scope}.id does not match filename: expected '{expected}', found '{actual}'")]
  IdentifierMismatch {
    scope: &'static str,
    expected: String,
    actual: String,
  },

  /// The document (or embedded manifest) is not valid JSON.
  #[error("JSON parse error - {0}")]
  Parse(#[from] serde_json::Error),

  /// The file could not be opened or read as an archive.
  #[error("invalid archive: {reason}")]
  CorruptArchive { reason: String },

  /// The archive has no entry ending in the manifest filename.
  #[error("no {manifest} entry found in archive")]
  ManifestNotFound { manifest: &'static str },

  /// Anything else, typically I/O.
  #[error("{0}")]
  Unexpected(#[from] std::io::Error),
}

/// A rejected file together with the reason.
#[derive(Debug)]
pub struct FileError {
  pub filename: String,
  pub error: ScanError,
}

impl fmt::Display for FileError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.filename, self.error)
  }
}

/// Errors that abort indexing of a whole directory.
#[derive(Debug, Error)]
pub enum IndexError {
  /// The directory exists but could not be listed.
  #[error("failed to read directory {}: {source}", .path.display())]
  ReadDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The index document could not be serialized.
  #[error("failed to serialize index document: {0}")]
  Serialize(#[from] serde_json::Error),

  /// The index document could not be written.
  #[error("failed to write index document {}: {source}", .path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}
