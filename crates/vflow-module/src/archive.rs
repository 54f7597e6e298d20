use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value;
use vflow_index::ScanError;
use zip::ZipArchive;

use crate::manifest::MANIFEST_FILENAME;

/// Largest manifest entry that will be read, in bytes.
pub const MAX_MANIFEST_SIZE: u64 = 1024 * 1024;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn corrupt<E: ToString>(reason: E) -> ScanError {
  ScanError::CorruptArchive {
    reason: reason.to_string(),
  }
}

/// Read and parse the manifest embedded in the package at `path`.
///
/// The manifest is the first entry, in archive order, whose path ends with
/// `manifest.json`, so it may sit in a subdirectory.
pub fn read_manifest(path: &Path) -> Result<Value, ScanError> {
  let file = File::open(path)?;
  let mut archive = ZipArchive::new(BufReader::new(file)).map_err(corrupt)?;

  let index = (0..archive.len())
    .find(|&i| {
      archive
        .name_for_index(i)
        .is_some_and(|name| name.ends_with(MANIFEST_FILENAME))
    })
    .ok_or(ScanError::ManifestNotFound {
      manifest: MANIFEST_FILENAME,
    })?;

  let entry = archive.by_index(index).map_err(corrupt)?;
  if entry.size() > MAX_MANIFEST_SIZE {
    return Err(corrupt(format!(
      "{} is {} bytes, larger than the {MAX_MANIFEST_SIZE} byte limit",
      entry.name(),
      entry.size()
    )));
  }

  let mut bytes = Vec::new();
  entry
    .take(MAX_MANIFEST_SIZE)
    .read_to_end(&mut bytes)
    .map_err(corrupt)?;

  let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);
  Ok(serde_json::from_slice(content)?)
}
