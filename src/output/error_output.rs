//! Colored error reporting on stderr.
//!
//! Format: `✖ {type}: {message}`, then `  × {cause}` per source in the
//! error chain, then `  help: {suggestion}` when one exists.

use std::error::Error as _;
use std::io::{IsTerminal, Write};

use crate::error::CorpusGuardError;

const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

pub struct ErrorOutput {
    use_colors: bool,
}

impl ErrorOutput {
    /// Colors when stderr is a TTY and `NO_COLOR` is unset.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            use_colors: std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal(),
        }
    }

    #[must_use]
    pub const fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub fn print(&self, err: &CorpusGuardError) {
        let mut stderr = std::io::stderr().lock();
        self.write_error(&mut stderr, err);
    }

    /// Write failures are ignored; there is nowhere left to report them.
    pub fn write_error<W: Write>(&self, w: &mut W, err: &CorpusGuardError) {
        let error_type = err.error_type();
        if self.use_colors {
            let _ = writeln!(w, "{BOLD}{RED}✖ {error_type}:{RESET} {err}");
        } else {
            let _ = writeln!(w, "✖ {error_type}: {err}");
        }

        let mut source = err.source();
        while let Some(cause) = source {
            if self.use_colors {
                let _ = writeln!(w, "  {DIM}× {cause}{RESET}");
            } else {
                let _ = writeln!(w, "  × {cause}");
            }
            source = cause.source();
        }

        if let Some(suggestion) = err.suggestion() {
            if self.use_colors {
                let _ = writeln!(w, "  {CYAN}help:{RESET} {suggestion}");
            } else {
                let _ = writeln!(w, "  help: {suggestion}");
            }
        }
    }
}

impl Default for ErrorOutput {
    fn default() -> Self {
        Self::stderr()
    }
}

pub fn print_error(err: &CorpusGuardError) {
    ErrorOutput::stderr().print(err);
}

#[cfg(test)]
#[path = "error_output_tests.rs"]
mod tests;
