mod commands;
mod core;
mod release;
mod ui;

use clap::Parser;
use clap::error::ErrorKind;
use crate::core::error::{ConfigError, ReleaseError, print_error};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Printed on stdout when the positional arguments are wrong
pub(crate) const USAGE: &str = "Usage: release <version>";

/// Package a versioned goo release: minify, generate docs, stamp and copy artifacts
#[derive(Parser)]
#[command(name = "release")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct ReleaseCli {
  /// Version to release, used verbatim in the directory name and header
  #[arg(value_name = "VERSION", allow_hyphen_values = true)]
  release_version: String,

  /// Show the release plan without running the build tool or touching files
  #[arg(long)]
  dry_run: bool,

  /// Output the plan in JSON format (with --dry-run)
  #[arg(long, requires = "dry_run")]
  json: bool,

  /// Require the version to be valid semver
  #[arg(long)]
  strict_version: bool,

  /// Release directory (overrides RELEASE_DIR and the default out/release/goo-<version>)
  #[arg(long, value_name = "DIR")]
  release_dir: Option<PathBuf>,

  /// Project root to run in (default: current directory)
  #[arg(long, value_name = "DIR")]
  root: Option<PathBuf>,

  /// Config file (default: search release.toml, .release.toml, .config/release.toml)
  #[arg(long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Enable debug logging (RUST_LOG takes precedence)
  #[arg(short, long)]
  verbose: bool,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn init_logging(verbose: bool) {
  let default = if verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() {
  let cli = match ReleaseCli::try_parse() {
    Ok(cli) => cli,
    Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
    Err(e) => {
      // Arity and flag errors share the one-line usage contract
      println!("{}", USAGE);
      eprint!("{}", e);
      std::process::exit(1);
    }
  };

  init_logging(cli.verbose);

  let result = commands::run_release(commands::ReleaseOptions {
    version: cli.release_version,
    root: cli.root,
    config: cli.config,
    release_dir: cli.release_dir,
    strict_version: cli.strict_version,
    dry_run: cli.dry_run,
    json: cli.json,
  });

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ReleaseError) -> ! {
  if matches!(err, ReleaseError::Config(ConfigError::Usage)) {
    println!("{}", USAGE);
  } else {
    print_error(&err);
  }
  std::process::exit(err.exit_code().as_i32());
}
