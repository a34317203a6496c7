//! Logging setup for binaries built on this crate.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the entry point, which calls [`init_logging`].

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Selects the output format: `json` or `text` (default).
pub const LOG_FORMAT_VAR: &str = "ODX_LOG_FORMAT";

const DEFAULT_FILTER: &str = "info";

static INIT_LOGGING: Once = Once::new();

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Read the format from `ODX_LOG_FORMAT`.
    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_VAR)
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }

    /// `json` (any case) selects JSON; anything else is text.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Install a stderr subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; a subscriber installed elsewhere is kept.
pub fn init_logging() {
    init_logging_with(LogFormat::from_env());
}

pub fn init_logging_with(format: LogFormat) {
    INIT_LOGGING.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let builder = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false);

        let result = match format {
            LogFormat::Json => builder.json().try_init(),
            LogFormat::Text => builder.try_init(),
        };
        if result.is_ok() {
            tracing::debug!(?format, "Logging initialized");
        }
    });
}
