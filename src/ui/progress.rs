//! Progress indicators for artifact copies
//!
//! Uses `linya` for allocation-free progress bars. Bars are only drawn when
//! stderr is a terminal so piped and CI output stays clean.

use linya::{Bar, Progress};
use std::io::IsTerminal;

/// Progress bar wrapper for file copies
pub struct FileProgress {
  progress: Progress,
  bar: Bar,
}

impl FileProgress {
  /// Create a new progress bar for copying `total` files
  pub fn new(total: usize, label: impl Into<String>) -> Self {
    let mut progress = Progress::new();
    let bar = progress.bar(total, label.into());
    Self { progress, bar }
  }

  /// Create a bar only when stderr is interactive and there is something to count
  pub fn for_terminal(total: usize, label: impl Into<String>) -> Option<Self> {
    if total == 0 || !std::io::stderr().is_terminal() {
      return None;
    }
    Some(Self::new(total, label))
  }

  /// Increment progress by 1
  pub fn inc(&mut self) {
    self.progress.inc_and_draw(&self.bar, 1);
  }
}
