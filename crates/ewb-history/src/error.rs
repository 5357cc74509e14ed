//! Error types for change history loading
//!
//! Covers:
//! - Configuration loading and validation
//! - Network failures and non-success responses
//! - Undecodable payloads

use std::path::PathBuf;

/// Errors while loading or validating [`HistoryConfig`](crate::HistoryConfig)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config values are out of range
    #[error("invalid config value: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Main change history error type
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// Request could not be sent or the connection failed
    #[error("request to {url} failed: {source}")]
    Request {
        /// Requested URL
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// Backend answered with a non-success status
    #[error("{url} returned status {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Response body did not match the expected payload
    #[error("invalid response from {url}: {message}")]
    Decode {
        /// Requested URL
        url: String,
        /// Decoder message
        message: String,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failure reported by a non-HTTP source
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

impl HistoryError {
    /// Create decode error for URL
    pub fn decode(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Check if error came from the transport or the backend
    #[inline]
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Request { .. } | Self::Status { .. } | Self::Unavailable(_)
        )
    }

    /// HTTP status, if the backend answered
    #[inline]
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;
