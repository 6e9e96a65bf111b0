//! Error types for the report contract model

use thiserror::Error;

/// Result type alias using the model Error
pub type Result<T> = std::result::Result<T, ModelError>;

/// Contract model error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown device identifier: {0}")]
    UnknownDevice(String),

    #[error("Empty device identifier in devices list: {0:?}")]
    EmptyDevice(String),

    #[error("Inverted date range: {start} > {end}")]
    InvertedRange { start: String, end: String },

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
