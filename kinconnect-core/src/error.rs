/// Structured error types for kinconnect-core.
///
/// Uses `thiserror` so library consumers get structured, composable errors.
/// The `kinconnect` binary wraps these in `anyhow` for context.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for kinconnect-core operations
#[derive(Error, Debug)]
pub enum KinError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Config file exists but is not valid TOML for our schema
    #[error("Failed to parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// A form field failed validation; `field` is the machine key, `label`
    /// the name shown to people
    #[error("{label} {reason}")]
    Validation {
        field: String,
        label: String,
        reason: String,
    },

    /// The invitation sender rejected the invitation
    #[error("Invitation could not be delivered: {reason}")]
    Delivery { reason: String },
}

/// Result type alias for kinconnect-core operations
pub type Result<T> = std::result::Result<T, KinError>;

impl KinError {
    /// Create a config parse error
    pub fn config_parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Create a validation error for a named form field
    pub fn validation(
        field: impl Into<String>,
        label: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Validation {
            field: field.into(),
            label: label.into(),
            reason: reason.into(),
        }
    }

    /// Create a delivery error
    pub fn delivery(reason: impl Into<String>) -> Self {
        Self::Delivery {
            reason: reason.into(),
        }
    }

    /// Name of the offending field, for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
