//! Output writers for dashboard reports.
//!
//! This module handles writing data to disk and to the terminal:
//! - JSON reports (pretty printed)
//! - Filtered rows as CSV
//! - Coloured text summaries

pub mod json;
pub mod table;
pub mod terminal;

// Re-export main functions
pub use json::{read_report, report_to_string, write_report};
pub use table::{write_rows_csv, write_rows_to};
pub use terminal::render_summary;

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

/// Validate that output path is writable
///
/// **Private** - shared by the file writers
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Refuse to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create missing parent directories of an output file
fn prepare_output_path(path: &Path) -> Result<(), OutputError> {
    validate_output_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

/// Calculate file size in bytes
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
