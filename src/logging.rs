// src/logging.rs

//! Logging setup for `streamtap` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the filter:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `STREAMTAP_LOG` environment variable; either a bare level ("debug")
//!    or full directives ("info,streamtap::console=off")
//! 3. default to `info`
//!
//! Logs go to STDERR. The `log` console target lands here too, under the
//! [`CONSOLE_TARGET`] target, so it can be filtered independently.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable consulted when no `--log-level` is given.
pub const LOG_ENV: &str = "STREAMTAP_LOG";

/// Tracing target used for text forwarded to the `log` console.
pub const CONSOLE_TARGET: &str = "streamtap::console";

/// Initialise global logging subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = match cli_level {
        Some(lvl) => EnvFilter::new(lvl.as_str()),
        None => std::env::var(LOG_ENV)
            .ok()
            .and_then(|s| parse_filter(&s))
            .unwrap_or_else(|| EnvFilter::new("info")),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {e}"))?;

    Ok(())
}

/// Parse the value of [`LOG_ENV`] into a filter.
///
/// `"warning"` is accepted as an alias for `"warn"`. Returns `None` for
/// empty or malformed input so the caller can fall back to the default.
pub fn parse_filter(s: &str) -> Option<EnvFilter> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let directives = if s.eq_ignore_ascii_case("warning") {
        "warn".to_string()
    } else {
        s.to_lowercase()
    };
    EnvFilter::try_new(directives).ok()
}
