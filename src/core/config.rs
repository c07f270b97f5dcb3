use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the computed release directory
pub const RELEASE_DIR_ENV: &str = "RELEASE_DIR";

/// Configuration for goo-release
/// Searched in order: release.toml, .release.toml, .config/release.toml
///
/// Every field has a default, so the file is optional and may be partial.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReleaseConfig {
  #[serde(default)]
  pub layout: LayoutConfig,
  #[serde(default)]
  pub tool: ToolConfig,
}

/// Where artifacts are read from and where releases are written
///
/// All paths are relative to the project root.
///
/// # Example
///
/// ```toml
/// [layout]
/// work_dir = "minified"
/// library_file = "minified/goo/goo.js"
/// library_dir = "minified/goo/lib"
/// docs_dir = "goojs-jsdoc"
/// license_file = "COPYING"
/// output_root = "out/release"
/// product_prefix = "goo-"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
  /// Build output directory, deleted at the start of every run
  pub work_dir: PathBuf,
  /// Minified library file that receives the version header
  pub library_file: PathBuf,
  /// Support directory copied to `<release>/lib`
  pub library_dir: PathBuf,
  /// Generated documentation copied to `<release>/docs`
  pub docs_dir: PathBuf,
  /// License file copied next to the library
  pub license_file: PathBuf,
  /// Parent of the default release directory
  pub output_root: PathBuf,
  /// Prefix of the release name, followed by the version
  pub product_prefix: String,
}

impl Default for LayoutConfig {
  fn default() -> Self {
    Self {
      work_dir: PathBuf::from("minified"),
      library_file: PathBuf::from("minified/goo/goo.js"),
      library_dir: PathBuf::from("minified/goo/lib"),
      docs_dir: PathBuf::from("goojs-jsdoc"),
      license_file: PathBuf::from("COPYING"),
      output_root: PathBuf::from("out/release"),
      product_prefix: "goo-".to_string(),
    }
  }
}

impl LayoutConfig {
  /// Release name, e.g. `goo-1.2.3`
  pub fn release_name(&self, version: &str) -> String {
    format!("{}{}", self.product_prefix, version)
  }

  /// Default release directory when no override is given
  pub fn default_release_dir(&self, version: &str) -> PathBuf {
    self.output_root.join(self.release_name(version))
  }
}

/// External build tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
  /// Executable on non-Windows hosts
  pub command: String,
  /// Executable on Windows hosts
  pub windows_command: String,
  /// Target that produces the work directory tree
  pub minify_target: String,
  /// Target that produces the documentation tree
  pub docs_target: String,
}

impl Default for ToolConfig {
  fn default() -> Self {
    Self {
      command: "cake".to_string(),
      windows_command: "cake.cmd".to_string(),
      minify_target: "minify".to_string(),
      docs_target: "jsdoc".to_string(),
    }
  }
}

impl ToolConfig {
  /// Executable name for the current platform
  pub fn program(&self) -> &str {
    if cfg!(windows) {
      &self.windows_command
    } else {
      &self.command
    }
  }
}

impl ReleaseConfig {
  /// Find config file in search order: release.toml, .release.toml, .config/release.toml
  pub fn find_config_path(root: &Path) -> Option<PathBuf> {
    let candidates = [
      root.join("release.toml"),
      root.join(".release.toml"),
      root.join(".config").join("release.toml"),
    ];

    candidates.into_iter().find(|p| p.is_file())
  }

  /// Load config from an explicit path, or search the root; defaults when nothing is found
  pub fn load(root: &Path, explicit: Option<&Path>) -> ReleaseResult<Self> {
    let config_path = match explicit {
      Some(path) => {
        let path = root.join(path);
        if !path.is_file() {
          return Err(ReleaseError::Config(ConfigError::NotFound { path }));
        }
        path
      }
      None => match Self::find_config_path(root) {
        Some(path) => path,
        None => {
          tracing::debug!(root = %root.display(), "no release.toml found, using defaults");
          return Ok(Self::default());
        }
      },
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::parse(&content)?;
    tracing::debug!(path = %config_path.display(), "loaded release configuration");
    Ok(config)
  }

  /// Parse config from TOML text
  pub fn parse(content: &str) -> ReleaseResult<Self> {
    let config: ReleaseConfig = toml_edit::de::from_str(content)?;
    if config.layout.product_prefix.contains(['/', '\\']) {
      return Err(ReleaseError::Config(ConfigError::Invalid {
        reason: format!(
          "product_prefix '{}' must not contain path separators",
          config.layout.product_prefix
        ),
      }));
    }
    Ok(config)
  }
}

/// Resolve the release directory from an explicit flag, the environment override, or the layout default
///
/// Precedence: flag, then `RELEASE_DIR`, then `<output_root>/<prefix><version>`.
/// An empty environment value counts as unset. Overrides are used verbatim.
pub fn resolve_release_dir(
  layout: &LayoutConfig,
  version: &str,
  flag: Option<PathBuf>,
  env_override: Option<OsString>,
) -> PathBuf {
  if let Some(dir) = flag {
    return dir;
  }
  match env_override {
    Some(value) if !value.is_empty() => PathBuf::from(value),
    _ => layout.default_release_dir(version),
  }
}

/// Everything a single release run needs, resolved up front
///
/// Paths inside `layout` stay relative; [`ReleaseContext::path`] anchors them at `root`.
#[derive(Debug, Clone)]
pub struct ReleaseContext {
  /// Project root every relative path is resolved against
  pub root: PathBuf,
  /// Version string, used verbatim
  pub version: String,
  /// Release directory as resolved (relative or absolute)
  pub release_dir: PathBuf,
  pub layout: LayoutConfig,
  pub tool: ToolConfig,
}

impl ReleaseContext {
  /// Anchor a configured path at the project root (absolute paths pass through)
  pub fn path(&self, relative: &Path) -> PathBuf {
    self.root.join(relative)
  }

  /// Release name, e.g. `goo-1.2.3`
  pub fn release_name(&self) -> String {
    self.layout.release_name(&self.version)
  }

  /// Absolute release directory
  pub fn release_path(&self) -> PathBuf {
    self.path(&self.release_dir)
  }
}
