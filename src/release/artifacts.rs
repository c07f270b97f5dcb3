//! Artifact copy primitives
//!
//! Single files are copied into a directory, overwriting an existing copy.
//! Trees are copied into a destination that must not exist yet.

use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use crate::ui::progress::FileProgress;
use std::fs;
use std::path::{Path, PathBuf};

/// Copy `source` into directory `dest_dir`, keeping its file name
///
/// Returns the path of the copy.
pub fn copy_file_into(source: &Path, dest_dir: &Path) -> ReleaseResult<PathBuf> {
  let file_name = source
    .file_name()
    .ok_or_else(|| ReleaseError::message(format!("Not a file path: {}", source.display())))?;
  let target = dest_dir.join(file_name);

  fs::copy(source, &target).with_context(|| format!("Failed to copy {} to {}", source.display(), target.display()))?;
  tracing::debug!(from = %source.display(), to = %target.display(), "copied file");
  Ok(target)
}

/// Recursively copy `source` to `target`
///
/// `target` must not exist. Returns the number of files copied.
pub fn copy_tree(source: &Path, target: &Path) -> ReleaseResult<usize> {
  if !source.is_dir() {
    return Err(ReleaseError::message(format!(
      "Source directory does not exist: {}",
      source.display()
    )));
  }

  if target.exists() {
    return Err(ReleaseError::with_help(
      format!("Destination already exists: {}", target.display()),
      "Release directories must be fresh. Remove it or pick another RELEASE_DIR.",
    ));
  }

  let label = target
    .file_name()
    .map(|n| n.to_string_lossy().to_string())
    .unwrap_or_default();
  let mut progress = FileProgress::for_terminal(count_files(source)?, label);

  let copied = copy_tree_impl(source, target, &mut progress)?;
  tracing::debug!(from = %source.display(), to = %target.display(), files = copied, "copied tree");
  Ok(copied)
}

fn copy_tree_impl(source: &Path, target: &Path, progress: &mut Option<FileProgress>) -> ReleaseResult<usize> {
  // create_dir (not create_dir_all) so a concurrently created target fails
  fs::create_dir(target).with_context(|| format!("Failed to create {}", target.display()))?;

  let mut copied = 0;
  for entry in fs::read_dir(source)? {
    let entry = entry?;
    let source_path = entry.path();
    let target_path = target.join(entry.file_name());

    // Path::is_dir follows symlinks, so linked directories are copied by content
    if source_path.is_dir() {
      copied += copy_tree_impl(&source_path, &target_path, progress)?;
    } else {
      fs::copy(&source_path, &target_path)
        .with_context(|| format!("Failed to copy {} to {}", source_path.display(), target_path.display()))?;
      copied += 1;
      if let Some(bar) = progress.as_mut() {
        bar.inc();
      }
    }
  }

  Ok(copied)
}

fn count_files(dir: &Path) -> ReleaseResult<usize> {
  let mut total = 0;
  for entry in fs::read_dir(dir)? {
    let path = entry?.path();
    if path.is_dir() {
      total += count_files(&path)?;
    } else {
      total += 1;
    }
  }
  Ok(total)
}
