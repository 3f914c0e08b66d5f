//! Error types for the delta screener

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenError {
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("No option expirations found for {0}")]
    NoExpirationsFound(String),

    #[error("Invalid option parameters: {0}")]
    InvalidOptionParameters(String),

    #[error("Data source error: {0}")]
    DataSource(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

pub type ScreenResult<T> = Result<T, ScreenError>;

impl ScreenError {
    pub fn data_unavailable(msg: impl Into<String>) -> Self {
        Self::DataUnavailable(msg.into())
    }

    pub fn no_expirations(symbol: impl Into<String>) -> Self {
        Self::NoExpirationsFound(symbol.into())
    }

    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::InvalidOptionParameters(msg.into())
    }

    pub fn data_source(msg: impl Into<String>) -> Self {
        Self::DataSource(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<serde_json::Error> for ScreenError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
