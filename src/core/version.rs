//! Version argument handling
//!
//! The version is used verbatim in the release directory name and in the header
//! comment. Any non-empty string is accepted unless strict mode asks for semver.

use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ValidationError};

/// Check a version argument
///
/// Empty strings are a usage error. With `strict`, the value must parse as semver.
pub fn check_version(version: &str, strict: bool) -> ReleaseResult<()> {
  if version.is_empty() {
    return Err(ReleaseError::Config(ConfigError::Usage));
  }

  if strict && let Err(e) = semver::Version::parse(version) {
    return Err(ReleaseError::Validation(ValidationError::Version {
      version: version.to_string(),
      reason: e.to_string(),
    }));
  }

  Ok(())
}

/// Header line prepended to the minified library
pub fn version_header(version: &str) -> String {
  format!("// Version {}\n", version)
}
