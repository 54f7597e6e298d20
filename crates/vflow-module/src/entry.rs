use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value, json};
use vflow_index::{IndexEntry, download_url, field_or};

/// Repository folder modules are published under.
const MODULES_FOLDER: &str = "modules";

/// Index record for a published module package.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleEntry {
  pub id: String,
  pub name: Value,
  pub description: Value,
  pub author: Value,
  pub version: Value,
  pub category: Value,
  pub homepage: Value,
  pub permissions: Value,
  pub inputs: Value,
  pub outputs: Value,
  pub filename: String,
  pub download_url: String,
  pub local_path: String,
}

impl ModuleEntry {
  /// Project a validated manifest into an index entry.
  pub fn from_manifest(
    id: &str,
    manifest: &Map<String, Value>,
    path: &Path,
    filename: &str,
  ) -> Self {
    Self {
      id: id.to_string(),
      name: field_or(manifest, "name", json!("unnamed")),
      description: field_or(manifest, "description", json!("")),
      author: field_or(manifest, "author", json!("unknown")),
      version: field_or(manifest, "version", json!("1.0.0")),
      category: field_or(manifest, "category", json!("user script")),
      homepage: field_or(manifest, "homepage", json!("")),
      permissions: field_or(manifest, "permissions", json!([])),
      inputs: field_or(manifest, "inputs", json!([])),
      outputs: field_or(manifest, "outputs", json!([])),
      filename: filename.to_string(),
      download_url: download_url(MODULES_FOLDER, filename),
      local_path: path.display().to_string(),
    }
  }
}

impl IndexEntry for ModuleEntry {
  fn id(&self) -> &str {
    &self.id
  }
}
