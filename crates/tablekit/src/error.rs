//! Error types for tablekit

use thiserror::Error;

/// Result type alias for tablekit operations
pub type TableResult<T> = Result<T, TableError>;

/// Error types for table operations
#[derive(Debug, Error)]
pub enum TableError {
    /// The table did not exist when the handle was created
    #[error("Table '{0}' does not exist in the database")]
    TableMissing(String),

    /// An operator received fewer values than it needs
    #[error("Values for {operator} must contain at least {expected} elements, got {got}")]
    Arity {
        operator: &'static str,
        expected: usize,
        got: usize,
    },

    /// Error reported by the underlying driver
    #[error("Driver error: {0}")]
    Driver(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),

    /// Row decode/mapping error
    #[error("Decode error: {0}")]
    Decode(String),
}

impl TableError {
    /// Create a driver error
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an arity error for a range operator
    pub fn arity(operator: &'static str, expected: usize, got: usize) -> Self {
        Self::Arity {
            operator,
            expected,
            got,
        }
    }

    /// Check if this is a missing table error
    pub fn is_table_missing(&self) -> bool {
        matches!(self, Self::TableMissing(_))
    }

    /// Check if this is an arity error
    pub fn is_arity(&self) -> bool {
        matches!(self, Self::Arity { .. })
    }
}

impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for TableError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
