//! Tracing setup for the binary

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding a tracing filter directive
pub const LOG_ENV_VAR: &str = "LOAN_LEDGER_LOG";

static TRACING_INIT: Once = Once::new();

/// Pick the filter directive: `LOAN_LEDGER_LOG` wins, then `--verbose`,
/// then the configured level
pub fn filter_directive(env_value: Option<String>, verbose: bool, configured: &str) -> String {
    match env_value {
        Some(value) if !value.trim().is_empty() => value,
        _ if verbose => "debug".to_string(),
        _ => configured.to_string(),
    }
}

/// Install the global subscriber, writing to stderr. Later calls are no-ops.
pub fn init_tracing(configured_level: &str, verbose: bool) {
    TRACING_INIT.call_once(|| {
        let directive = filter_directive(std::env::var(LOG_ENV_VAR).ok(), verbose, configured_level);
        let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_precedence() {
        assert_eq!(filter_directive(Some("trace".into()), true, "warn"), "trace");
        assert_eq!(filter_directive(None, true, "warn"), "debug");
        assert_eq!(filter_directive(Some("  ".into()), false, "info"), "info");
        assert_eq!(filter_directive(None, false, "warn"), "warn");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing("warn", false);
        init_tracing("debug", true);
    }
}
