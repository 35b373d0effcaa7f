//! Tracing subscriber installation.

use crate::settings::TelemetrySettings;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Errors returned while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured filter directive is malformed.
    #[error("invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),

    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(Box<dyn std::error::Error + Send + Sync>),
}

/// Builds the event filter, preferring `RUST_LOG` over `default_directive`.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when `RUST_LOG` is unset and
/// `default_directive` cannot be parsed.
pub fn env_filter(default_directive: &str) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(default_directive)?),
    }
}

/// Installs a global `fmt` subscriber configured from `settings`.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is malformed or a subscriber
/// is already installed.
pub fn init_tracing(settings: &TelemetrySettings) -> Result<(), TelemetryError> {
    let filter = env_filter(&settings.log_level)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if settings.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(TelemetryError::Install)
}
