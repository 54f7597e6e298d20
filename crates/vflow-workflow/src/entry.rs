use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value, json};
use vflow_index::{IndexEntry, download_url, field_or};

/// Repository folder workflows are published under.
const WORKFLOWS_FOLDER: &str = "workflows";

/// Index record for a published workflow.
///
/// Metadata values are echoed as-is; defaults only fill in absent keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowEntry {
  pub id: String,
  pub name: Value,
  pub description: Value,
  pub author: Value,
  pub version: Value,
  #[serde(rename = "vFlowLevel")]
  pub level: Value,
  pub homepage: Value,
  pub tags: Value,
  pub updated_at: Value,
  pub filename: String,
  pub download_url: String,
  pub local_path: String,
}

impl WorkflowEntry {
  /// Project a validated `_meta` block into an index entry.
  pub fn from_meta(id: &str, meta: &Map<String, Value>, path: &Path, filename: &str) -> Self {
    Self {
      id: id.to_string(),
      name: field_or(meta, "name", json!("unnamed")),
      description: field_or(meta, "description", json!("")),
      author: field_or(meta, "author", json!("unknown")),
      version: field_or(meta, "version", json!("1.0.0")),
      level: field_or(meta, "vFlowLevel", json!(1)),
      homepage: field_or(meta, "homepage", json!("")),
      tags: field_or(meta, "tags", json!([])),
      updated_at: field_or(meta, "updated_at", json!("")),
      filename: filename.to_string(),
      download_url: download_url(WORKFLOWS_FOLDER, filename),
      local_path: path.display().to_string(),
    }
  }
}

impl IndexEntry for WorkflowEntry {
  fn id(&self) -> &str {
    &self.id
  }
}
