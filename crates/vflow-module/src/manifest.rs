use serde_json::{Map, Value};
use vflow_index::{ScanError, require_fields, require_matching_id};

/// Extension of module packages.
pub const MODULE_EXTENSION: &str = ".zip";

/// Name of the manifest entry inside a package.
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Scope used when reporting manifest problems.
pub const MANIFEST_SCOPE: &str = "manifest";

/// Keys every manifest must carry.
pub const REQUIRED_MANIFEST_FIELDS: [&str; 6] =
  ["id", "name", "description", "author", "version", "category"];

/// Validate a parsed manifest taken from the package `filename`.
pub fn validate_manifest<'a>(
  manifest: &'a Value,
  filename: &str,
) -> Result<&'a Map<String, Value>, ScanError> {
  let fields = require_fields(MANIFEST_SCOPE, Some(manifest), &REQUIRED_MANIFEST_FIELDS)?;
  require_matching_id(MANIFEST_SCOPE, fields, filename, MODULE_EXTENSION)?;
  Ok(fields)
}
