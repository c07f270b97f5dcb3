//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A throwaway goo project root with a fake `cake` on PATH
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
  bin_dir: PathBuf,
}

impl TestProject {
  /// Create a project with a COPYING file and a fake build tool
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().join("project");
    let bin_dir = root.path().join("bin");
    std::fs::create_dir_all(&path)?;
    std::fs::create_dir_all(&bin_dir)?;

    std::fs::write(path.join("COPYING"), "The MIT License\n\nCopyright (c) Goo Technologies AB\n")?;

    #[cfg(unix)]
    install_fake_cake(&bin_dir)?;

    Ok(Self {
      _root: root,
      path,
      bin_dir,
    })
  }

  /// Write a file relative to the project root
  pub fn write(&self, rel: &str, content: &str) -> Result<()> {
    let file = self.path.join(rel);
    if let Some(parent) = file.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file, content)?;
    Ok(())
  }

  /// Check if a file exists
  pub fn file_exists(&self, rel: &str) -> bool {
    self.path.join(rel).exists()
  }

  /// Read a file
  pub fn read_file(&self, rel: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(rel))?)
  }

  /// Targets the fake tool was invoked with, in order
  pub fn cake_calls(&self) -> Result<Vec<String>> {
    if !self.file_exists("cake.log") {
      return Ok(vec![]);
    }
    Ok(self.read_file("cake.log")?.lines().map(String::from).collect())
  }

  /// Base command for the release binary with the fake tool first on PATH
  pub fn command(&self, args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_release"));
    let path = std::env::var_os("PATH").unwrap_or_default();
    let mut paths = vec![self.bin_dir.clone()];
    paths.extend(std::env::split_paths(&path));

    cmd
      .current_dir(&self.path)
      .args(args)
      .env("PATH", std::env::join_paths(paths).expect("valid PATH"))
      .env_remove("RELEASE_DIR")
      .env_remove("RUST_LOG")
      .env_remove("FAKE_CAKE_FAIL");
    cmd
  }
}

/// Install a `cake` shell script that mimics the minify and jsdoc targets
///
/// Each invocation appends its target to cake.log. If the work directory already
/// exists when minify starts, `stale-work-dir` is logged first. Setting
/// FAKE_CAKE_FAIL to a target name makes that target exit with status 3.
#[cfg(unix)]
fn install_fake_cake(bin_dir: &Path) -> Result<()> {
  use std::os::unix::fs::PermissionsExt;

  let script = r#"#!/bin/sh
if [ "$1" = "minify" ] && [ -e minified ]; then
  echo stale-work-dir >> cake.log
fi
echo "$1" >> cake.log
if [ "$1" = "$FAKE_CAKE_FAIL" ]; then
  exit 3
fi
case "$1" in
  minify)
    mkdir -p minified/goo/lib
    printf 'var x=1;' > minified/goo/goo.js
    printf 'polyk' > minified/goo/lib/polyk.js
    ;;
  jsdoc)
    mkdir -p goojs-jsdoc
    printf '<html/>' > goojs-jsdoc/index.html
    ;;
esac
"#;
  let cake = bin_dir.join("cake");
  std::fs::write(&cake, script)?;
  std::fs::set_permissions(&cake, std::fs::Permissions::from_mode(0o755))?;
  Ok(())
}

/// Run the release binary and return its output, whatever the exit status
pub fn run_release_raw(project: &TestProject, args: &[&str]) -> Result<Output> {
  project.command(args).output().context("Failed to run release")
}

/// Run the release binary and require success
pub fn run_release(project: &TestProject, args: &[&str]) -> Result<Output> {
  let output = run_release_raw(project, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "release command failed: release {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Release directory path under the default layout
pub fn default_release_dir(root: &Path, version: &str) -> PathBuf {
  root.join("out/release").join(format!("goo-{}", version))
}
