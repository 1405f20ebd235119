//! Diagnostic logging for the CLI.
//!
//! Logs go to stderr so stdout stays reserved for reports.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::LintError;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// Structured JSON output, one event per line.
    Json,
}

impl LogFormat {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Initialize the logging subsystem.
///
/// `RUST_LOG` takes precedence over `level`.
pub fn init_logging(level: &str, format: LogFormat) -> Result<(), LintError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => init_json_logging(filter),
        LogFormat::Pretty => init_pretty_logging(filter),
    }
}

fn init_json_logging(filter: EnvFilter) -> Result<(), LintError> {
    let json_layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_current_span(true)
        .with_span_list(false)
        .flatten_event(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(json_layer)
        .try_init()
        .map_err(|e: tracing_subscriber::util::TryInitError| LintError::LoggingInit(e.to_string()))
}

fn init_pretty_logging(filter: EnvFilter) -> Result<(), LintError> {
    let pretty_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(pretty_layer)
        .try_init()
        .map_err(|e: tracing_subscriber::util::TryInitError| LintError::LoggingInit(e.to_string()))
}
