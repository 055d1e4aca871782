use thiserror::Error;

use crate::validation::InputFormatError;
use crate::worksheet::WorksheetError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid data: {0}")]
    InvalidInput(#[from] InputFormatError),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Worksheet error: {0}")]
    Worksheet(#[from] WorksheetError),

    #[error("Data shape error: {0}")]
    DataShape(String),
}

impl Error {
    /// Create a data shape error
    pub fn data_shape<E: std::fmt::Display>(msg: E) -> Self {
        Self::DataShape(msg.to_string())
    }

    /// Create a configuration error
    pub fn config<E: std::fmt::Display>(msg: E) -> Self {
        Self::Config(msg.to_string())
    }

    /// Errors that end the run rather than re-prompting the operator
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
