//! Release plans for dry-run and review
//!
//! A [`Plan`] lists, in order, everything a release run would do. It is printed
//! instead of executed with `--dry-run`, and serialized with `--json`.

use crate::core::error::ReleaseResult;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Plan identifier (SHA256 hash of plan contents)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanId(String);

impl PlanId {
  /// Create a plan ID from plan contents
  pub fn from_contents(contents: &[u8]) -> Self {
    let mut hasher = Sha256::new();
    hasher.update(contents);
    let result = hasher.finalize();
    Self(format!("{:x}", result))
  }

  /// Get the short ID (first 12 characters)
  pub fn short(&self) -> &str {
    &self.0[..12.min(self.0.len())]
  }
}

impl fmt::Display for PlanId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.short())
  }
}

/// Single step of a release run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
  /// Delete the work directory if present
  RemoveDir { path: String },

  /// Run a build tool target
  RunTool { program: String, target: String },

  /// Prepend a header line to a file
  Stamp { path: String, header: String },

  /// Create a directory and its parents if missing
  CreateDir { path: String },

  /// Copy a single file
  CopyFile { from: String, to: String },

  /// Copy a directory tree into a destination that must not exist
  CopyTree { from: String, to: String },
}

/// An ordered list of operations for one release
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
  /// Content hash of `operations`
  pub id: PlanId,

  /// Release name, e.g. `goo-1.2.3`
  pub release: String,

  pub version: String,

  /// Resolved release directory
  pub release_dir: String,

  /// Operations to perform (in order)
  pub operations: Vec<Operation>,
}

impl Plan {
  /// Create an empty plan
  pub fn new(release: impl Into<String>, version: impl Into<String>, release_dir: impl Into<String>) -> Self {
    Self {
      id: PlanId::from_contents(&[]),
      release: release.into(),
      version: version.into(),
      release_dir: release_dir.into(),
      operations: Vec::new(),
    }
  }

  /// Add an operation to the plan
  pub fn add_operation(&mut self, operation: Operation) {
    self.operations.push(operation);
    self.recompute_id();
  }

  fn recompute_id(&mut self) {
    let json = serde_json::to_vec(&self.operations).unwrap_or_default();
    self.id = PlanId::from_contents(&json);
  }

  /// Serialize to JSON
  pub fn to_json(&self) -> ReleaseResult<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  /// Get human-readable representation
  pub fn to_human_readable(&self) -> String {
    let mut output = String::new();

    output.push_str(&format!("📋 Plan: release {} ({})\n", self.release, self.id));
    output.push_str(&format!("   Version: {}\n", self.version));
    output.push_str(&format!("   Destination: {}\n", self.release_dir));
    output.push_str(&format!("\n   Operations ({}):\n", self.operations.len()));

    for (i, op) in self.operations.iter().enumerate() {
      output.push_str(&format!("   {}. {}\n", i + 1, op));
    }

    output
  }
}

impl fmt::Display for Operation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Operation::RemoveDir { path } => write!(f, "Remove {} (if present)", path),
      Operation::RunTool { program, target } => write!(f, "Run {} {}", program, target),
      Operation::Stamp { path, header } => write!(f, "Stamp {} with '{}'", path, header.trim_end()),
      Operation::CreateDir { path } => write!(f, "Create directory {} (if missing)", path),
      Operation::CopyFile { from, to } => write!(f, "Copy {} → {}", from, to),
      Operation::CopyTree { from, to } => write!(f, "Copy tree {} → {}", from, to),
    }
  }
}
