//! Layered configuration for composing a task tracker.
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! environment variables prefixed with `TASKTRACK__` using `__` as the
//! nesting separator (for example `TASKTRACK__STORAGE__BACKEND=postgres`).

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TASKTRACK";

const ENV_SEPARATOR: &str = "__";

/// Errors returned while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or deserialized.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The `PostgreSQL` backend was selected without a database URL.
    #[error("storage.database_url is required when storage.backend is postgres")]
    MissingDatabaseUrl,

    /// The connection pool size is zero.
    #[error("storage.pool_size must be greater than zero")]
    InvalidPoolSize,
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Storage backend settings.
    pub storage: StorageSettings,
    /// Logging settings.
    pub telemetry: TelemetrySettings,
}

/// Which repository implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Process-local maps; contents are lost on exit.
    #[default]
    Memory,
    /// `PostgreSQL` through a Diesel connection pool.
    Postgres,
}

/// Storage backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageSettings {
    /// Selected backend.
    pub backend: StorageBackend,
    /// Connection URL, required for [`StorageBackend::Postgres`].
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_size: u32,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TelemetrySettings {
    /// Default filter directive when `RUST_LOG` is unset.
    pub log_level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Settings {
    /// Loads settings from defaults and `TASKTRACK__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when a value cannot be deserialized or the
    /// combination is invalid.
    pub fn load() -> Result<Self, SettingsError> {
        Self::from_builder(Config::builder().add_source(environment()))
    }

    /// Loads settings from defaults, a TOML file, then environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the file cannot be read, a value cannot
    /// be deserialized, or the combination is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        Self::from_builder(
            Config::builder()
                .add_source(File::from(path).format(FileFormat::Toml))
                .add_source(environment()),
        )
    }

    /// Parses settings from TOML text layered over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the text cannot be parsed or the
    /// combination is invalid.
    pub fn from_toml(contents: &str) -> Result<Self, SettingsError> {
        Self::from_builder(Config::builder().add_source(File::from_str(contents, FileFormat::Toml)))
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when the `PostgreSQL`
    /// backend has no URL, or [`SettingsError::InvalidPoolSize`] when the
    /// pool size is zero.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let has_url = self
            .storage
            .database_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty());
        if self.storage.backend == StorageBackend::Postgres && !has_url {
            return Err(SettingsError::MissingDatabaseUrl);
        }
        if self.storage.pool_size == 0 {
            return Err(SettingsError::InvalidPoolSize);
        }
        Ok(())
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let settings: Self = builder
            .set_default("storage.backend", "memory")?
            .set_default("storage.pool_size", 4)?
            .set_default("telemetry.log_level", "info")?
            .set_default("telemetry.json", false)?
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}
