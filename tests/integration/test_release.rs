//! End-to-end tests for `release <version>` against a fake build tool

#![cfg(unix)]

use crate::helpers::*;
use anyhow::Result;
use std::fs;

#[test]
fn test_release_end_to_end() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_release(&project, &["9.9.9"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Creating release goo-9.9.9"), "stdout: {}", stdout);
  assert!(stdout.contains("Creating release in out/release/goo-9.9.9"), "stdout: {}", stdout);

  let rel = default_release_dir(&project.path, "9.9.9");
  assert_eq!(fs::read_to_string(rel.join("goo.js"))?, "// Version 9.9.9\nvar x=1;");
  assert_eq!(fs::read_to_string(rel.join("lib/polyk.js"))?, "polyk");
  assert_eq!(fs::read_to_string(rel.join("docs/index.html"))?, "<html/>");
  assert_eq!(fs::read(rel.join("COPYING"))?, fs::read(project.path.join("COPYING"))?);
  assert_eq!(project.cake_calls()?, vec!["minify", "jsdoc"]);

  Ok(())
}

#[test]
fn test_stale_work_dir_removed_before_minify() -> Result<()> {
  let project = TestProject::new()?;
  project.write("minified/goo/leftover.js", "stale")?;

  run_release(&project, &["1.0.0"])?;

  assert_eq!(project.cake_calls()?, vec!["minify", "jsdoc"]);
  assert!(!project.file_exists("minified/goo/leftover.js"));

  Ok(())
}

#[test]
fn test_minify_failure_aborts_release() -> Result<()> {
  let project = TestProject::new()?;

  let output = project.command(&["1.0.0"]).env("FAKE_CAKE_FAIL", "minify").output()?;

  assert_eq!(output.status.code(), Some(3));
  assert_eq!(project.cake_calls()?, vec!["minify"]);
  assert!(!project.file_exists("out"));
  assert!(String::from_utf8_lossy(&output.stderr).contains("cake minify"));

  Ok(())
}

#[test]
fn test_jsdoc_failure_aborts_release() -> Result<()> {
  let project = TestProject::new()?;

  let output = project.command(&["1.0.0"]).env("FAKE_CAKE_FAIL", "jsdoc").output()?;

  assert_eq!(output.status.code(), Some(3));
  assert_eq!(project.cake_calls()?, vec!["minify", "jsdoc"]);
  assert_eq!(project.read_file("minified/goo/goo.js")?, "var x=1;");
  assert!(!project.file_exists("out"));

  Ok(())
}

#[test]
fn test_release_dir_env_override() -> Result<()> {
  let project = TestProject::new()?;
  let target = tempfile::TempDir::new()?;
  let dest = target.path().join("x");

  let output = project.command(&["1.2.3"]).env("RELEASE_DIR", &dest).output()?;
  assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

  assert!(dest.join("goo.js").exists());
  assert!(dest.join("lib/polyk.js").exists());
  assert!(dest.join("docs/index.html").exists());
  assert!(dest.join("COPYING").exists());
  assert!(!project.file_exists("out"));

  Ok(())
}

#[test]
fn test_rerun_into_same_release_dir_fails() -> Result<()> {
  let project = TestProject::new()?;

  run_release(&project, &["1.0.0"])?;
  let output = run_release_raw(&project, &["1.0.0"])?;

  assert!(!output.status.success());
  assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));

  Ok(())
}

#[test]
fn test_missing_license_fails_after_trees_copied() -> Result<()> {
  let project = TestProject::new()?;
  fs::remove_file(project.path.join("COPYING"))?;

  let output = run_release_raw(&project, &["1.0.0"])?;

  assert_eq!(output.status.code(), Some(2));
  let rel = default_release_dir(&project.path, "1.0.0");
  assert!(rel.join("docs").exists());
  assert!(!rel.join("COPYING").exists());

  Ok(())
}

#[test]
fn test_config_file_changes_layout() -> Result<()> {
  let project = TestProject::new()?;
  project.write("LICENSE", "BSD")?;
  project.write(
    "release.toml",
    r#"
[layout]
license_file = "LICENSE"
output_root = "dist"
product_prefix = "goojs-"
"#,
  )?;

  run_release(&project, &["0.5.0"])?;

  assert_eq!(project.read_file("dist/goojs-0.5.0/LICENSE")?, "BSD");
  assert_eq!(project.read_file("dist/goojs-0.5.0/goo.js")?, "// Version 0.5.0\nvar x=1;");

  Ok(())
}
