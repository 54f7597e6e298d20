//! Schema checks shared by the workflow and module validators.

use serde_json::{Map, Value};

use crate::error::ScanError;

/// Strip a known extension from a filename to get the artifact identifier.
///
/// Only a trailing suffix is removed; a filename without it is returned as-is.
pub fn normalize_id<'a>(filename: &'a str, suffix: &str) -> &'a str {
  filename.strip_suffix(suffix).unwrap_or(filename)
}

/// Check that every key in `required` is present in `object`.
///
/// Presence is all that matters, a key set to `null` counts as present.
/// A missing object (or one that isn't a JSON object) lacks every key.
pub fn require_fields<'a>(
  scope: &'static str,
  object: Option<&'a Value>,
  required: &[&str],
) -> Result<&'a Map<String, Value>, ScanError> {
  let map = object.and_then(Value::as_object);

  let missing: Vec<String> = required
    .iter()
    .filter(|field| map.is_none_or(|m| !m.contains_key(**field)))
    .map(|field| field.to_string())
    .collect();

  match map {
    Some(map) if missing.is_empty() => Ok(map),
    _ => Err(ScanError::MissingRequiredFields {
      scope,
      fields: missing,
    }),
  }
}

/// Check that the declared `id` equals the filename-derived identifier.
pub fn require_matching_id(
  scope: &'static str,
  object: &Map<String, Value>,
  filename: &str,
  suffix: &str,
) -> Result<(), ScanError> {
  let expected = normalize_id(filename, suffix);

  match object.get("id") {
    Some(Value::String(id)) if id == expected => Ok(()),
    other => Err(ScanError::IdentifierMismatch {
      scope,
      expected: expected.to_string(),
      actual: match other {
        Some(Value::String(id)) => id.clone(),
        Some(value) => value.to_string(),
        None => String::new(),
      },
    }),
  }
}
