//! Structured logging for the `ba-pns` binary.
//!
//! A global `tracing` subscriber writes to stderr, filtered by `RUST_LOG`
//! (default `info`). `BA_PNS_LOG_FORMAT` selects human-readable or JSON lines,
//! and records emitted through the `log` facade are forwarded into `tracing`.

use std::{env, str::FromStr, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Environment variable selecting the output format.
pub const LOG_FORMAT_ENV: &str = "BA_PNS_LOG_FORMAT";

const DEFAULT_FILTER: &str = "info";

static INSTALLED: OnceLock<LogFormat> = OnceLock::new();

/// Output format of the diagnostics stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact human-readable lines.
    #[default]
    Human,
    /// One JSON object per line, including the active span list.
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnsupportedFormat {
                provided: other.to_owned(),
            }),
        }
    }
}

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The format variable was not valid UTF-8.
    #[error("environment variable `{name}` contained invalid UTF-8")]
    InvalidUnicode {
        /// Name of the offending variable.
        name: &'static str,
    },
    /// The format variable named an unknown format.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Value supplied by the user.
        provided: String,
    },
}

/// Reads the requested format from [`LOG_FORMAT_ENV`].
///
/// # Errors
/// Returns [`LoggingError`] when the variable is not UTF-8 or names an
/// unknown format.
pub fn format_from_env() -> Result<LogFormat, LoggingError> {
    match env::var(LOG_FORMAT_ENV) {
        Ok(raw) => raw.parse(),
        Err(env::VarError::NotPresent) => Ok(LogFormat::default()),
        Err(env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode {
            name: LOG_FORMAT_ENV,
        }),
    }
}

/// Installs the global subscriber once and returns the active format.
///
/// Later calls return the format chosen by the first call. When another
/// subscriber already owns the global slot it is left in place.
///
/// # Errors
/// Returns [`LoggingError`] when [`LOG_FORMAT_ENV`] is malformed.
pub fn init_logging() -> Result<LogFormat, LoggingError> {
    if let Some(format) = INSTALLED.get() {
        return Ok(*format);
    }
    let format = format_from_env()?;
    install(format);
    Ok(*INSTALLED.get_or_init(|| format))
}

fn install(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let output = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE);
    let output = match format {
        LogFormat::Human => output.boxed(),
        LogFormat::Json => output
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    };

    // Both installs are best-effort: an embedding process may already own
    // the global logger or subscriber.
    let _ = LogTracer::init();
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init();
}
