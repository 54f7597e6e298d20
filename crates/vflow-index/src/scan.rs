use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::error::{FileError, IndexError, ScanError};

/// Base URL that published artifacts are downloaded from.
pub const REPOSITORY_BASE_URL: &str = "https://raw.githubusercontent.com/ChaoMixian/vFlow-Repos/main";

/// Build the public download URL for an artifact in the given repository folder.
pub fn download_url(folder: &str, filename: &str) -> String {
  format!("{REPOSITORY_BASE_URL}/{folder}/{filename}")
}

/// Echo `key` from a metadata block, or `default` when the key is absent.
pub fn field_or(object: &Map<String, Value>, key: &str, default: Value) -> Value {
  object.get(key).cloned().unwrap_or(default)
}

/// A summary record that appears in an index document.
pub trait IndexEntry: Serialize {
  /// Identifier used to order the index.
  fn id(&self) -> &str;
}

/// Scans one artifact directory and summarizes its valid artifacts.
pub trait Scanner {
  type Entry: IndexEntry;

  /// Key the entries are stored under in the index document, e.g. "workflows".
  const ITEM_TYPE: &'static str;

  /// Scan `dir`, never treating `index_file` as an artifact.
  ///
  /// Per-file problems end up in the report; only failing to list an
  /// existing directory is an error.
  fn scan(&self, dir: &Path, index_file: &str) -> Result<ScanReport<Self::Entry>, IndexError>;
}

/// What a scanner found in a directory.
#[derive(Debug)]
pub struct ScanReport<E> {
  /// Valid entries in enumeration order.
  pub entries: Vec<E>,
  pub errors: Vec<FileError>,
  pub skipped: Vec<String>,
}

impl<E> Default for ScanReport<E> {
  fn default() -> Self {
    Self {
      entries: Vec::new(),
      errors: Vec::new(),
      skipped: Vec::new(),
    }
  }
}

impl<E> ScanReport<E> {
  /// Record that `filename` was rejected and skip it.
  pub fn reject(&mut self, filename: &str, error: ScanError) {
    error!(file = %filename, error = %error, "rejected artifact");
    self.skipped.push(filename.to_string());
    self.errors.push(FileError {
      filename: filename.to_string(),
      error,
    });
  }
}

/// Collect the artifact files directly inside `dir`.
///
/// Every entry whose name ends in `extension` is returned except the index
/// document itself. Directories and non UTF-8 names are kept too, so the
/// scanner reports them as rejected files instead of dropping them. The whole
/// listing is gathered before any file is touched so callers can rewrite
/// files safely. A directory that doesn't exist yields no candidates.
pub fn list_candidates(
  dir: &Path,
  extension: &str,
  index_file: &str,
) -> Result<Vec<PathBuf>, IndexError> {
  if !dir.exists() {
    warn!(dir = %dir.display(), "artifact directory does not exist");
    return Ok(Vec::new());
  }

  let read_dir_error = |source| IndexError::ReadDir {
    path: dir.to_path_buf(),
    source,
  };

  let mut candidates = Vec::new();
  for entry in fs::read_dir(dir).map_err(read_dir_error)? {
    let path = entry.map_err(read_dir_error)?.path();

    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
      continue;
    };

    if !name.ends_with(extension) || name == index_file {
      debug!(path = %path.display(), "not an artifact candidate");
      continue;
    }

    candidates.push(path);
  }

  Ok(candidates)
}
