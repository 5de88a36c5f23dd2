//! # qry-config
//!
//! Layered configuration loading for qry using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`QRY_*` prefix, `__` as separator)
//! 2. An explicit file passed to [`QryConfig::load_file`]
//! 3. Project-level `.qry/config.toml`
//! 4. User-level `~/.config/qry/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `QRY_MESSAGES__STOPPED_AT` -> `messages.stopped_at`,
//! `QRY_LOG__LEVEL` -> `log.level`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use qry_config::QryConfig;
//!
//! let config = QryConfig::load_with_dotenv().expect("config");
//! println!("trace header: {}", config.messages.stack_trace);
//! ```

mod error;
mod log;

pub use error::ConfigError;
pub use log::LogConfig;
pub use qry_core::MessageText;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "QRY_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QryConfig {
    /// Text fragments used when rendering error messages.
    #[serde(default)]
    pub messages: MessageText,
    #[serde(default)]
    pub log: LogConfig,
}

impl QryConfig {
    /// Load configuration from defaults, TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::figment())
    }

    /// Load `.env` from the current directory first, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Like [`Self::load`], with `path` layered above the discovered TOML files.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if `path` does not exist, or any
    /// extraction/validation error.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        Self::extract(Self::figment_with(Some(path)))
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect it or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_with(None)
    }

    fn figment_with(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".qry/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit file
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Check values figment cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.log.validate()
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("qry").join("config.toml"))
    }
}
