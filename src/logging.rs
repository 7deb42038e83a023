//! Diagnostic logging on stderr.
//!
//! `RUST_LOG` takes precedence; otherwise the level follows the verbosity
//! flags so stdout stays reserved for command output.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default filter directive for the given flags.
#[must_use]
pub const fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(verbose: u8, quiet: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(default_directive(0, false), "warn");
        assert_eq!(default_directive(1, false), "info");
        assert_eq!(default_directive(2, false), "debug");
        assert_eq!(default_directive(5, false), "trace");
    }

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(default_directive(2, true), "error");
    }

    #[test]
    fn repeated_init_does_not_panic() {
        init(0, true);
        init(1, false);
    }
}
