//! Tracing subscriber setup for the command-line binary.
//!
//! Logs go to stderr so stdout only ever carries rendered output.

use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "PANTALON_LOG";

/// Maps `-v` occurrences to a default filter.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Builds the filter from `PANTALON_LOG`, then `RUST_LOG`, then `verbosity`.
pub fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)))
}

/// Installs the global subscriber and bridges `log` records into it.
pub fn init(verbosity: u8) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing_log::LogTracer::init()?;
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0), "warn");
        assert_eq!(default_directive(1), "info");
        assert_eq!(default_directive(2), "debug");
        assert_eq!(default_directive(7), "trace");
    }

    #[test]
    fn test_second_init_reports_typed_error() {
        use crate::error::PantalonError;
        use std::error::Error;

        let _ = init(0);
        let err = init(0).unwrap_err();

        assert!(matches!(err, PantalonError::LogBridge(_)));
        assert!(err.source().is_some());
    }
}
