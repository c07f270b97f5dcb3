//! External build tool invocation
//!
//! The packager only cares whether a target succeeded. [`BuildTool`] is the seam
//! that lets tests swap the subprocess for an in-process fake.

use crate::core::config::ToolConfig;
use crate::core::error::{ReleaseError, ReleaseResult, ToolError};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Something that can run a named build target to completion
pub trait BuildTool {
  /// Run `target` and block until it finishes. Non-success is an error.
  fn run_target(&self, target: &str) -> ReleaseResult<()>;

  /// Display name used in plans and messages
  fn name(&self) -> &str;
}

/// Build tool backed by a system executable (`cake` / `cake.cmd`)
pub struct SystemTool {
  program: String,
  /// Working directory for the subprocess
  cwd: PathBuf,
}

impl SystemTool {
  pub fn new(config: &ToolConfig, cwd: &Path) -> Self {
    Self {
      program: config.program().to_string(),
      cwd: cwd.to_path_buf(),
    }
  }
}

impl BuildTool for SystemTool {
  fn run_target(&self, target: &str) -> ReleaseResult<()> {
    tracing::debug!(program = %self.program, tool_target = target, cwd = %self.cwd.display(), "running build tool");

    // Inherit stdio so tool output reaches the user; only the exit status matters here
    let status = Command::new(&self.program)
      .arg(target)
      .current_dir(&self.cwd)
      .status()
      .map_err(|e| {
        ReleaseError::Tool(ToolError::SpawnFailed {
          command: self.program.clone(),
          target: target.to_string(),
          reason: e.to_string(),
        })
      })?;

    if !status.success() {
      return Err(ReleaseError::Tool(ToolError::Failed {
        command: self.program.clone(),
        target: target.to_string(),
        code: status.code(),
      }));
    }

    Ok(())
  }

  fn name(&self) -> &str {
    &self.program
  }
}
