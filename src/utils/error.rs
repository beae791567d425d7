//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the trade dataset
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Dataset not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid record at line {line}: {message}")]
    InvalidRecord { line: u64, message: String },

    #[error("Invalid record at row {row} of the JSON array: {message}")]
    InvalidRow { row: usize, message: String },

    #[error("Unsupported dataset format: {0}")]
    UnsupportedFormat(String),
}

/// Errors raised while turning textual choices into filter values
#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("Invalid value '{value}' for {attribute}")]
    InvalidValue { attribute: String, value: String },
}

/// Errors that can occur while reading municipal boundaries
#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Failed to read boundary file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid boundary format: {0}")]
    InvalidFormat(String),
}

/// Errors that can occur while loading dashboard configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    CsvFailed(#[from] csv::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
