//! Tracing subscriber setup for the binary.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;

/// Picks the effective level: `--verbose` and `--quiet` override the
/// configured level.
pub fn resolve_level(configured: LevelFilter, verbose: bool, quiet: bool) -> LevelFilter {
    if verbose {
        LevelFilter::TRACE
    } else if quiet {
        LevelFilter::ERROR
    } else {
        configured
    }
}

/// Installs a stderr fmt subscriber filtered at `level`.
///
/// Does nothing if a global subscriber is already set.
pub fn init_logging(level: LevelFilter) {
    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(level),
        )
        .try_init();

    if result.is_ok() {
        tracing::debug!(%level, "logging initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_level_flags_override_config() {
        assert_eq!(resolve_level(LevelFilter::WARN, true, false), LevelFilter::TRACE);
        assert_eq!(resolve_level(LevelFilter::WARN, false, true), LevelFilter::ERROR);
        assert_eq!(resolve_level(LevelFilter::INFO, false, false), LevelFilter::INFO);
    }
}
