use std::io::IsTerminal;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while a dataset streams in.
///
/// Hidden in quiet mode or when stderr is not a TTY.
#[derive(Clone)]
pub struct LoadProgress {
    spinner: ProgressBar,
    lines: Arc<AtomicU64>,
}

impl LoadProgress {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self::new_with_visibility(quiet, std::io::stderr().is_terminal())
    }

    #[must_use]
    pub fn hidden() -> Self {
        Self::new_with_visibility(true, false)
    }

    fn new_with_visibility(quiet: bool, is_tty: bool) -> Self {
        let spinner = if quiet || !is_tty {
            ProgressBar::hidden()
        } else {
            Self::create_visible_spinner()
        };
        Self {
            spinner,
            lines: Arc::new(AtomicU64::new(0)),
        }
    }

    fn create_visible_spinner() -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} Loading dataset: {pos} lines ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    /// Record one more line read.
    pub fn inc(&self) {
        let count = self.lines.fetch_add(1, Ordering::Relaxed) + 1;
        self.spinner.set_position(count);
    }

    #[must_use]
    pub fn lines(&self) -> u64 {
        self.lines.load(Ordering::Relaxed)
    }

    /// Stop the spinner and clear it from the terminal.
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
