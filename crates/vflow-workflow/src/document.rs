use serde_json::{Map, Value};
use vflow_index::{ScanError, require_fields, require_matching_id};

/// Extension of workflow documents.
pub const WORKFLOW_EXTENSION: &str = ".json";

/// Top-level key holding the workflow's descriptive metadata.
pub const META_KEY: &str = "_meta";

/// Keys every `_meta` block must carry.
pub const REQUIRED_META_FIELDS: [&str; 6] =
  ["id", "name", "description", "author", "version", "vFlowLevel"];

/// Runtime state that is always published as `false`.
pub const RUNTIME_FLAGS: [&str; 3] = ["isEnabled", "isFavorite", "wasEnabledBeforePermissionsLost"];

/// Validate a parsed workflow document published as `filename`.
///
/// On success returns the `_meta` block; the document itself is untouched.
pub fn validate_workflow<'a>(
  document: &'a Value,
  filename: &str,
) -> Result<&'a Map<String, Value>, ScanError> {
  let meta = document
    .as_object()
    .and_then(|doc| doc.get(META_KEY))
    .ok_or(ScanError::MissingMetadata)?;

  let meta = require_fields(META_KEY, Some(meta), &REQUIRED_META_FIELDS)?;
  require_matching_id(META_KEY, meta, filename, WORKFLOW_EXTENSION)?;

  Ok(meta)
}

/// Copy of `document` with every runtime flag forced to `false`.
///
/// Existing flags keep their position, missing ones are appended.
pub fn sanitize_workflow(document: &Value) -> Value {
  let mut sanitized = document.clone();
  if let Value::Object(fields) = &mut sanitized {
    for flag in RUNTIME_FLAGS {
      fields.insert(flag.to_string(), Value::Bool(false));
    }
  }
  sanitized
}
