use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;
use tracing::info;
use vflow_index::{IndexError, ScanError, ScanReport, Scanner, list_candidates, normalize_id};

use crate::document::{WORKFLOW_EXTENSION, sanitize_workflow, validate_workflow};
use crate::entry::WorkflowEntry;

/// Scans a workflows directory.
///
/// Every valid document is rewritten in place with its runtime flags
/// cleared. Rejected documents are left exactly as they were.
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkflowScanner;

impl WorkflowScanner {
  pub fn new() -> Self {
    Self
  }

  fn process(&self, path: &Path, filename: &str) -> Result<WorkflowEntry, ScanError> {
    let content = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&content)?;

    let meta = validate_workflow(&document, filename)?;
    let entry = WorkflowEntry::from_meta(
      normalize_id(filename, WORKFLOW_EXTENSION),
      meta,
      path,
      filename,
    );

    let sanitized =
      serde_json::to_string_pretty(&sanitize_workflow(&document)).map_err(io::Error::from)?;
    write_replacing(path, &sanitized)?;

    Ok(entry)
  }
}

/// Write-then-rename so a failed write never leaves a truncated workflow.
fn write_replacing(path: &Path, contents: &str) -> io::Result<()> {
  let temp_path = path.with_extension("json.tmp");
  if let Err(e) = fs::write(&temp_path, contents) {
    let _ = fs::remove_file(&temp_path);
    return Err(e);
  }
  fs::rename(&temp_path, path)
}

impl Scanner for WorkflowScanner {
  type Entry = WorkflowEntry;
  const ITEM_TYPE: &'static str = "workflows";

  fn scan(&self, dir: &Path, index_file: &str) -> Result<ScanReport<WorkflowEntry>, IndexError> {
    let mut report = ScanReport::default();

    for path in list_candidates(dir, WORKFLOW_EXTENSION, index_file)? {
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
            level = %entry.level,
            "indexed workflow"
          );
          report.entries.push(entry);
        }
        Err(e) => report.reject(&filename, e),
      }
    }

    Ok(report)
  }
}
