//! Error types for the worksheet layer

use std::fmt;
use thiserror::Error;

/// Result type for worksheet operations
pub type WorksheetResult<T> = Result<T, WorksheetError>;

/// Worksheet store error types
#[derive(Error, Debug)]
pub enum WorksheetError {
    /// Named worksheet does not exist in the store
    #[error("Worksheet not found: {0}")]
    NotFound(String),

    /// Store could not be reached
    #[error("Connection error: {0}")]
    Connection(String),

    /// Credentials were rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Store answered with an unexpected response
    #[error("API error: {0}")]
    Api(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Backend misconfigured
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl WorksheetError {
    /// Create a not found error
    pub fn not_found<E: fmt::Display>(name: E) -> Self {
        Self::NotFound(name.to_string())
    }

    /// Create a connection error
    pub fn connection<E: fmt::Display>(msg: E) -> Self {
        Self::Connection(msg.to_string())
    }

    /// Create an authentication error
    pub fn authentication<E: fmt::Display>(msg: E) -> Self {
        Self::Authentication(msg.to_string())
    }

    /// Create an API error
    pub fn api<E: fmt::Display>(msg: E) -> Self {
        Self::Api(msg.to_string())
    }

    /// Create a configuration error
    pub fn configuration<E: fmt::Display>(msg: E) -> Self {
        Self::Configuration(msg.to_string())
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<reqwest::Error> for WorksheetError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::connection(err)
        } else {
            Self::api(err)
        }
    }
}
