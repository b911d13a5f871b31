//! Diagnostics for the `bboard` binary.
//!
//! Log lines go to stderr so a board rendered on stdout can be piped or
//! redirected on its own. `BULLETIN_LOG` accepts `EnvFilter` directives and
//! overrides the level picked from the command-line flags.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable read for filter directives.
pub const LOG_ENV: &str = "BULLETIN_LOG";

/// How much the binary reports on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Warnings, such as an unreadable stored board.
    #[default]
    Normal,
    /// Each post created or deleted.
    Verbose,
    /// Store and render internals.
    Debug,
    /// Everything.
    Trace,
}

impl Verbosity {
    /// Verbosity for a `-v` count and the `--quiet` flag; quiet wins.
    #[must_use]
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, 2) => Self::Debug,
            (false, _) => Self::Trace,
        }
    }

    /// Most detailed level let through.
    #[must_use]
    pub fn level(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal => LevelFilter::WARN,
            Self::Verbose => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

/// Install the stderr subscriber.
///
/// Calling this more than once is harmless; later calls are ignored.
///
/// ```no_run
/// use bulletin::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(1, false));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::builder()
        .with_default_directive(verbosity.level().into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

/// Route warnings from tests through the test harness's captured output.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_overrides_verbose_count() {
        assert_eq!(Verbosity::from_flags(3, true), Verbosity::Quiet);
    }

    #[test]
    fn test_verbose_count_steps() {
        let levels: Vec<LevelFilter> = (0..5)
            .map(|count| Verbosity::from_flags(count, false).level())
            .collect();
        assert_eq!(
            levels,
            vec![
                LevelFilter::WARN,
                LevelFilter::INFO,
                LevelFilter::DEBUG,
                LevelFilter::TRACE,
                LevelFilter::TRACE,
            ]
        );
    }

    #[test]
    fn test_normal_still_reports_warnings() {
        assert!(Verbosity::Normal.level() >= LevelFilter::WARN);
        assert!(Verbosity::Normal.level() < LevelFilter::INFO);
    }
}
