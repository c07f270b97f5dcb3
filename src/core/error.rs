//! Error types for goo-release with contextual messages and exit codes
//!
//! Every failure of a release run ends up as a [`ReleaseError`]. Each variant maps to
//! an exit code and may carry a help line that is printed under the error.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for the release tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (invalid args, bad config)
  User,
  /// System error (I/O, tool could not be spawned or was killed)
  System,
  /// Validation failure (strict version check)
  Validation,
  /// Exit status propagated from the build tool
  Propagated(i32),
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    match self {
      ExitCode::User => 1,
      ExitCode::System => 2,
      ExitCode::Validation => 3,
      ExitCode::Propagated(code) => code,
    }
  }
}

/// Main error type for goo-release
#[derive(Debug)]
pub enum ReleaseError {
  /// Configuration errors
  Config(ConfigError),

  /// External build tool errors
  Tool(ToolError),

  /// Validation errors
  Validation(ValidationError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  ///
  /// I/O errors are folded into a message so the failing path is not lost.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ReleaseError::Io(e) => ReleaseError::Message {
        message: ctx_str,
        context: Some(format!("I/O error: {}", e)),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::Config(_) => ExitCode::User,
      ReleaseError::Tool(e) => e.exit_code(),
      ReleaseError::Validation(_) => ExitCode::Validation,
      ReleaseError::Io(_) => ExitCode::System,
      ReleaseError::Message { .. } => ExitCode::System,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Tool(e) => e.help_message(),
      ReleaseError::Validation(e) => e.help_message(),
      ReleaseError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Tool(e) => write!(f, "{}", e),
      ReleaseError::Validation(e) => write!(f, "{}", e),
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<String> for ReleaseError {
  fn from(msg: String) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<&str> for ReleaseError {
  fn from(msg: &str) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<toml_edit::de::Error> for ReleaseError {
  fn from(err: toml_edit::de::Error) -> Self {
    ReleaseError::Config(ConfigError::Invalid {
      reason: err.to_string(),
    })
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

impl From<tempfile::PersistError> for ReleaseError {
  fn from(err: tempfile::PersistError) -> Self {
    ReleaseError::Io(err.error)
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Explicitly requested config file does not exist
  NotFound { path: PathBuf },

  /// Config file could not be parsed
  Invalid { reason: String },

  /// Wrong number of positional arguments
  Usage,
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Omit --config to use the defaults, or create release.toml in the project root.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => write!(f, "Config file not found: {}", path.display()),
      ConfigError::Invalid { reason } => write!(f, "Invalid release configuration: {}", reason),
      ConfigError::Usage => write!(f, "{}", crate::USAGE),
    }
  }
}

/// Build tool errors
#[derive(Debug)]
pub enum ToolError {
  /// The tool could not be started at all
  SpawnFailed {
    command: String,
    target: String,
    reason: String,
  },

  /// The tool ran and reported failure
  Failed {
    command: String,
    target: String,
    /// None when the process was terminated by a signal
    code: Option<i32>,
  },
}

impl ToolError {
  fn exit_code(&self) -> ExitCode {
    match self {
      ToolError::Failed { code: Some(code), .. } if *code != 0 => ExitCode::Propagated(*code),
      _ => ExitCode::System,
    }
  }

  fn help_message(&self) -> Option<String> {
    match self {
      ToolError::SpawnFailed { command, .. } => Some(format!(
        "Make sure `{}` is installed and on PATH, or set [tool] command in release.toml.",
        command
      )),
      ToolError::Failed { .. } => Some("The work directory may be partially populated; rerun after fixing the build.".to_string()),
    }
  }
}

impl fmt::Display for ToolError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ToolError::SpawnFailed {
        command,
        target,
        reason,
      } => write!(f, "Failed to run `{} {}`: {}", command, target, reason),
      ToolError::Failed { command, target, code } => match code {
        Some(code) => write!(f, "`{} {}` exited with status {}", command, target, code),
        None => write!(f, "`{} {}` was terminated by a signal", command, target),
      },
    }
  }
}

/// Validation errors
#[derive(Debug)]
pub enum ValidationError {
  /// Version is not valid semver under --strict-version
  Version { version: String, reason: String },
}

impl ValidationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationError::Version { .. } => {
        Some("Use a semver version such as 1.2.3, or drop --strict-version.".to_string())
      }
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::Version { version, reason } => {
        write!(f, "Invalid version '{}': {}", version, reason)
      }
    }
  }
}

/// Result type alias for goo-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
