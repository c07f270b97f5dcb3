//! Version stamping
//!
//! Prepends a header line to a generated file. The new content is written to a
//! temporary file in the same directory and renamed over the original, so a crash
//! leaves either the old file or the fully stamped one.

use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Prepend `header` to the file at `path`, preserving the original bytes exactly
pub fn prepend(path: &Path, header: &str) -> ReleaseResult<()> {
  let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

  let dir = path
    .parent()
    .filter(|p| !p.as_os_str().is_empty())
    .unwrap_or_else(|| Path::new("."));

  let mut tmp = NamedTempFile::new_in(dir)
    .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
  tmp
    .write_all(header.as_bytes())
    .and_then(|_| tmp.write_all(&content))
    .and_then(|_| tmp.flush())
    .with_context(|| format!("Failed to write stamped copy of {}", path.display()))?;

  // Keep the original file mode; NamedTempFile is created 0600
  let permissions = fs::metadata(path)
    .context(format!("Failed to read permissions of {}", path.display()))?
    .permissions();
  fs::set_permissions(tmp.path(), permissions)
    .with_context(|| format!("Failed to set permissions on {}", tmp.path().display()))?;

  tmp
    .persist(path)
    .map_err(ReleaseError::from)
    .with_context(|| format!("Failed to replace {}", path.display()))?;

  tracing::debug!(path = %path.display(), bytes = content.len() + header.len(), "stamped file");
  Ok(())
}
