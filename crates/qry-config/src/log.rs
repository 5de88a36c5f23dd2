//! Logging configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Levels accepted by `log.level`.
pub const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Default log level.
fn default_level() -> String {
    String::from("warn")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Default tracing level when neither `QRY_LOG_FILTER` nor a CLI flag overrides it.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl LogConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if LEVELS.contains(&self.level.as_str()) {
            Ok(())
        } else {
            Err(ConfigError::InvalidValue {
                field: String::from("log.level"),
                reason: format!("expected one of {}, got '{}'", LEVELS.join(", "), self.level),
            })
        }
    }
}
