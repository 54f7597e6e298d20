use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, SecondsFormat};
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{info, warn};

use crate::error::{FileError, IndexError};
use crate::scan::{IndexEntry, Scanner};

/// Schema version written into every index document.
pub const INDEX_SCHEMA_VERSION: &str = "1.0";

/// Default filename of the index document inside an artifact directory.
pub const DEFAULT_INDEX_FILE: &str = "index.json";

/// The consolidated index of one artifact directory.
///
/// Serializes as
/// `{"version", "last_updated", "total_count", <item_type>: [entries]}`,
/// with `total_count` always derived from the entries.
#[derive(Debug)]
pub struct IndexDocument<E> {
  pub version: &'static str,
  pub last_updated: String,
  pub item_type: &'static str,
  pub entries: Vec<E>,
}

impl<E: IndexEntry> IndexDocument<E> {
  /// Build a document, ordering entries by id.
  pub fn new(item_type: &'static str, last_updated: String, mut entries: Vec<E>) -> Self {
    entries.sort_by(|a, b| a.id().cmp(b.id()));
    Self {
      version: INDEX_SCHEMA_VERSION,
      last_updated,
      item_type,
      entries,
    }
  }

  pub fn total_count(&self) -> usize {
    self.entries.len()
  }
}

impl<E: Serialize> Serialize for IndexDocument<E> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(4))?;
    map.serialize_entry("version", self.version)?;
    map.serialize_entry("last_updated", &self.last_updated)?;
    map.serialize_entry("total_count", &self.entries.len())?;
    map.serialize_entry(self.item_type, &self.entries)?;
    map.end()
  }
}

/// Outcome of indexing one directory.
#[derive(Debug)]
pub struct IndexReport {
  pub item_type: &'static str,
  pub directory: PathBuf,
  /// Where the index was written, `None` when the directory doesn't exist.
  pub output_path: Option<PathBuf>,
  pub last_updated: String,
  pub total_count: usize,
  pub errors: Vec<FileError>,
  pub skipped: Vec<String>,
}

impl IndexReport {
  /// True when no file was rejected.
  pub fn success(&self) -> bool {
    self.errors.is_empty()
  }
}

/// Runs a [`Scanner`] over a directory and writes the resulting index document.
pub struct IndexBuilder<S> {
  scanner: S,
  output_file: String,
}

impl<S: Scanner> IndexBuilder<S> {
  pub fn new(scanner: S) -> Self {
    Self {
      scanner,
      output_file: DEFAULT_INDEX_FILE.to_string(),
    }
  }

  /// Use a different index filename. The same name is excluded from scanning.
  pub fn with_output_file(mut self, output_file: impl Into<String>) -> Self {
    self.output_file = output_file.into();
    self
  }

  /// Scan `dir` and write `<dir>/<output_file>`, overwriting any existing index.
  ///
  /// A missing directory produces an empty, successful report and no file.
  pub fn build(&self, dir: &Path) -> Result<IndexReport, IndexError> {
    info!(dir = %dir.display(), item_type = S::ITEM_TYPE, "scanning artifact directory");

    let report = self.scanner.scan(dir, &self.output_file)?;
    let last_updated = Local::now().to_rfc3339_opts(SecondsFormat::Micros, false);
    let document = IndexDocument::new(S::ITEM_TYPE, last_updated, report.entries);

    let output_path = if dir.exists() {
      let path = dir.join(&self.output_file);
      let json = serde_json::to_string_pretty(&document)?;
      fs::write(&path, json).map_err(|source| IndexError::Write {
        path: path.clone(),
        source,
      })?;
      info!(
        path = %path.display(),
        total_count = document.total_count(),
        "wrote index document"
      );
      Some(path)
    } else {
      warn!(dir = %dir.display(), "no index written for missing directory");
      None
    };

    Ok(IndexReport {
      item_type: S::ITEM_TYPE,
      directory: dir.to_path_buf(),
      output_path,
      total_count: document.total_count(),
      last_updated: document.last_updated,
      errors: report.errors,
      skipped: report.skipped,
    })
  }
}
