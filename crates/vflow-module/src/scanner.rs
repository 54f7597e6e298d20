use std::path::Path;

use tracing::info;
use vflow_index::{IndexError, ScanError, ScanReport, Scanner, list_candidates, normalize_id};

use crate::archive::read_manifest;
use crate::entry::ModuleEntry;
use crate::manifest::{MODULE_EXTENSION, validate_manifest};

/// Scans a modules directory. Packages are only ever read.
#[derive(Debug, Default, Clone, Copy)]
pub struct ModuleScanner;

impl ModuleScanner {
  pub fn new() -> Self {
    Self
  }

  fn process(&self, path: &Path, filename: &str) -> Result<ModuleEntry, ScanError> {
    let manifest = read_manifest(path)?;
    let fields = validate_manifest(&manifest, filename)?;

    Ok(ModuleEntry::from_manifest(
      normalize_id(filename, MODULE_EXTENSION),
      fields,
      path,
      filename,
    ))
  }
}

impl Scanner for ModuleScanner {
  type Entry = ModuleEntry;
  const ITEM_TYPE: &'static str = "modules";

  fn scan(&self, dir: &Path, index_file: &str) -> Result<ScanReport<ModuleEntry>, IndexError> {
    let mut report = ScanReport::default();

    for path in list_candidates(dir, MODULE_EXTENSION, index_file)? {
      let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

      match self.process(&path, &filename) {
        Ok(entry) => {
          info!(
            file = %filename,
            name = %entry.name,
            version = %entry.version,
            category = %entry.category,
            "indexed module"
          );
          report.entries.push(entry);
        }
        Err(e) => report.reject(&filename, e),
      }
    }

    Ok(report)
  }
}
