//! `release <version>` - package a versioned goo release
//!
//! Resolves all ambient state (project root, `RELEASE_DIR`, `release.toml`) once,
//! then hands an explicit [`ReleaseContext`] to the packager.

use crate::core::config::{RELEASE_DIR_ENV, ReleaseConfig, ReleaseContext, resolve_release_dir};
use crate::core::error::ReleaseResult;
use crate::core::tool::SystemTool;
use crate::core::version::check_version;
use crate::release::{Packager, ReleaseObserver};
use std::path::{Path, PathBuf};

/// Options for a release run, straight from the command line
#[derive(Debug, Clone, Default)]
pub struct ReleaseOptions {
  pub version: String,
  pub root: Option<PathBuf>,
  pub config: Option<PathBuf>,
  pub release_dir: Option<PathBuf>,
  pub strict_version: bool,
  pub dry_run: bool,
  pub json: bool,
}

/// Prints the two status lines of a release run
struct ConsoleObserver;

impl ReleaseObserver for ConsoleObserver {
  fn creating_release(&mut self, name: &str) {
    println!("📦 Creating release {}", name);
  }

  fn copying_into(&mut self, release_dir: &Path) {
    println!("📁 Creating release in {}", release_dir.display());
  }
}

/// Run the release command
pub fn run_release(opts: ReleaseOptions) -> ReleaseResult<()> {
  check_version(&opts.version, opts.strict_version)?;

  let root = match opts.root {
    Some(root) => root,
    None => std::env::current_dir()?,
  };

  let config = ReleaseConfig::load(&root, opts.config.as_deref())?;
  let release_dir = resolve_release_dir(
    &config.layout,
    &opts.version,
    opts.release_dir,
    std::env::var_os(RELEASE_DIR_ENV),
  );

  let ctx = ReleaseContext {
    root,
    version: opts.version,
    release_dir,
    layout: config.layout,
    tool: config.tool,
  };
  tracing::debug!(?ctx, "resolved release context");

  let tool = SystemTool::new(&ctx.tool, &ctx.root);
  let packager = Packager::new(&ctx, &tool);

  if opts.dry_run {
    let plan = packager.plan();
    if opts.json {
      println!("{}", plan.to_json()?);
    } else {
      println!("\n🔍 DRY-RUN MODE - No changes will be made\n");
      println!("{}", plan.to_human_readable());
      println!("✋ To execute this plan, run:");
      println!("   release {}", ctx.version);
    }
    return Ok(());
  }

  let outcome = packager.run(&mut ConsoleObserver)?;

  tracing::debug!(files = outcome.tree_files, artifacts = outcome.artifacts.len(), "copied artifacts");
  println!("✅ Release {} ready in {}", ctx.release_name(), outcome.release_dir.display());

  Ok(())
}
