//! CLI commands for goo-release
//!
//! - **release**: package a versioned release (or print its plan with `--dry-run`)

pub mod release;

pub use release::{ReleaseOptions, run_release};
