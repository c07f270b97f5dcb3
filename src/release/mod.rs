//! Release packaging
//!
//! A release run is strictly sequential:
//!
//! 1. Reset the work directory
//! 2. Run the build tool `minify` target
//! 3. Run the build tool `jsdoc` target
//! 4. Stamp `// Version <version>` into the minified library
//! 5. Create the release directory if missing
//! 6. Copy library file, `lib/`, `docs/` and license into it
//!
//! Any failure aborts the run. Nothing is rolled back; a failed run can leave a
//! partially populated work or release directory behind.

pub mod artifacts;
pub mod stamp;

use crate::core::config::ReleaseContext;
use crate::core::error::{ReleaseResult, ResultExt};
use crate::core::plan::{Operation, Plan};
use crate::core::tool::BuildTool;
use crate::core::version::version_header;
use std::fs;
use std::path::{Path, PathBuf};

/// Subdirectory of the release that receives the library support tree
pub const LIB_SUBDIR: &str = "lib";
/// Subdirectory of the release that receives the documentation tree
pub const DOCS_SUBDIR: &str = "docs";

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct ReleaseOutcome {
  /// Absolute release directory
  pub release_dir: PathBuf,
  /// Paths of the copied artifacts, in copy order
  pub artifacts: Vec<PathBuf>,
  /// Files copied by the two tree copies
  pub tree_files: usize,
}

/// Hooks for user-facing progress lines
///
/// The packager itself does not print; the command layer decides what the user sees.
pub trait ReleaseObserver {
  /// Called before the build tool runs
  fn creating_release(&mut self, _name: &str) {}
  /// Called before artifacts are copied
  fn copying_into(&mut self, _release_dir: &Path) {}
}

/// Runs a release against a resolved context and a build tool
pub struct Packager<'a, T: BuildTool> {
  ctx: &'a ReleaseContext,
  tool: &'a T,
}

impl<'a, T: BuildTool> Packager<'a, T> {
  pub fn new(ctx: &'a ReleaseContext, tool: &'a T) -> Self {
    Self { ctx, tool }
  }

  /// Execute every step in order
  pub fn run(&self, observer: &mut dyn ReleaseObserver) -> ReleaseResult<ReleaseOutcome> {
    let ctx = self.ctx;
    let layout = &ctx.layout;

    observer.creating_release(&ctx.release_name());

    self.reset_work_dir()?;

    tracing::info!(tool_target = %ctx.tool.minify_target, "minifying");
    self.tool.run_target(&ctx.tool.minify_target)?;
    tracing::info!(tool_target = %ctx.tool.docs_target, "generating docs");
    self.tool.run_target(&ctx.tool.docs_target)?;

    let library_file = ctx.path(&layout.library_file);
    stamp::prepend(&library_file, &version_header(&ctx.version))?;

    let release_dir = ctx.release_path();
    observer.copying_into(&ctx.release_dir);

    if !release_dir.is_dir() {
      fs::create_dir_all(&release_dir).with_context(|| format!("Failed to create {}", release_dir.display()))?;
    }

    let mut copied = Vec::with_capacity(4);
    copied.push(artifacts::copy_file_into(&library_file, &release_dir)?);

    let lib_target = release_dir.join(LIB_SUBDIR);
    let mut tree_files = artifacts::copy_tree(&ctx.path(&layout.library_dir), &lib_target)?;
    copied.push(lib_target);

    let docs_target = release_dir.join(DOCS_SUBDIR);
    tree_files += artifacts::copy_tree(&ctx.path(&layout.docs_dir), &docs_target)?;
    copied.push(docs_target);

    copied.push(artifacts::copy_file_into(&ctx.path(&layout.license_file), &release_dir)?);

    tracing::info!(release_dir = %release_dir.display(), files = tree_files + 2, "release complete");
    Ok(ReleaseOutcome {
      release_dir,
      artifacts: copied,
      tree_files,
    })
  }

  /// Describe the run without touching the filesystem or the tool
  pub fn plan(&self) -> Plan {
    let ctx = self.ctx;
    let layout = &ctx.layout;
    let display = |p: &Path| p.display().to_string();
    let release_dir = &ctx.release_dir;

    let mut plan = Plan::new(ctx.release_name(), &ctx.version, display(release_dir));
    plan.add_operation(Operation::RemoveDir {
      path: display(&layout.work_dir),
    });
    for target in [&ctx.tool.minify_target, &ctx.tool.docs_target] {
      plan.add_operation(Operation::RunTool {
        program: self.tool.name().to_string(),
        target: target.clone(),
      });
    }
    plan.add_operation(Operation::Stamp {
      path: display(&layout.library_file),
      header: version_header(&ctx.version),
    });
    plan.add_operation(Operation::CreateDir {
      path: display(release_dir),
    });
    plan.add_operation(Operation::CopyFile {
      from: display(&layout.library_file),
      to: display(release_dir),
    });
    plan.add_operation(Operation::CopyTree {
      from: display(&layout.library_dir),
      to: display(&release_dir.join(LIB_SUBDIR)),
    });
    plan.add_operation(Operation::CopyTree {
      from: display(&layout.docs_dir),
      to: display(&release_dir.join(DOCS_SUBDIR)),
    });
    plan.add_operation(Operation::CopyFile {
      from: display(&layout.license_file),
      to: display(release_dir),
    });
    plan
  }

  fn reset_work_dir(&self) -> ReleaseResult<()> {
    let work_dir = self.ctx.path(&self.ctx.layout.work_dir);
    if work_dir.is_dir() {
      tracing::debug!(path = %work_dir.display(), "removing stale work directory");
      fs::remove_dir_all(&work_dir).with_context(|| format!("Failed to remove {}", work_dir.display()))?;
    }
    Ok(())
  }
}
