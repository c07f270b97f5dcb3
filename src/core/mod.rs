//! Core building blocks for goo-release
//!
//! - **config**: optional release.toml layout and tool settings, release context
//! - **error**: error types with exit codes and help messages
//! - **plan**: dry-run plans with content-hashed IDs
//! - **tool**: external build tool abstraction (system `cake`)
//! - **version**: version argument checks and header formatting

pub mod config;
pub mod error;
pub mod plan;
pub mod tool;
pub mod version;
