//! Table handle configuration.
//!
//! Configuration can be built in code with the builder methods or loaded from
//! a TOML file:
//!
//! ```toml
//! charset_collate = "DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci"
//! default_order = "DESC"
//!
//! [sql_log]
//! enabled = true
//! level = "info"
//! max_sql_length = 500
//! ```

use crate::columns::Order;
use crate::error::{TableError, TableResult};
use serde::Deserialize;
use std::path::Path;
use tracing::Level;

/// Configuration for a [`Table`](crate::Table) handle.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Trailing charset/collation clause appended to `CREATE TABLE`.
    pub charset_collate: Option<String>,
    /// Direction used when a caller asks for ordering without giving one.
    pub default_order: Order,
    /// SQL statement logging.
    pub sql_log: SqlLogConfig,
}

impl TableConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from a TOML document.
    pub fn from_toml_str(raw: &str) -> TableResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> TableResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            TableError::Config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Set the charset/collation clause used by `CREATE TABLE`.
    pub fn charset_collate(mut self, clause: impl Into<String>) -> Self {
        self.charset_collate = Some(clause.into());
        self
    }

    /// Set the default ORDER BY direction.
    pub fn default_order(mut self, order: Order) -> Self {
        self.default_order = order;
        self
    }

    /// Replace the SQL logging configuration.
    pub fn sql_log(mut self, sql_log: SqlLogConfig) -> Self {
        self.sql_log = sql_log;
        self
    }

    /// Disable SQL logging.
    pub fn no_sql_log(mut self) -> Self {
        self.sql_log.enabled = false;
        self
    }
}

/// Level names accepted in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    #[default]
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Configuration for the `tracing` events emitted per statement.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SqlLogConfig {
    /// Whether statements are logged at all.
    pub enabled: bool,
    /// Event level.
    pub level: LogLevel,
    /// Truncate long SQL strings (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for SqlLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Debug,
            max_sql_length: Some(200),
        }
    }
}

impl SqlLogConfig {
    /// Create a new logging configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the event level.
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }
}
