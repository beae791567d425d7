//! JSON report output writer.
//!
//! Writes DashboardReport structs to JSON files with proper formatting.

use super::{calculate_file_size, prepare_output_path};
use crate::report::DashboardReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `report` - Report to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let report = build_report(&dataset, &selection, &config, &MapRequest::default(), None);
/// write_report(&report, "report.json")?;
/// ```
pub fn write_report(
    report: &DashboardReport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    prepare_output_path(output_path)?;

    let file = File::create(output_path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)?;

    info!(
        "Report written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Write a report to a string
///
/// **Public** - useful for tests and in-memory use
pub fn report_to_string(report: &DashboardReport) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Read a report from a JSON file
///
/// **Public** - used by the validate command and tests
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<DashboardReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path)?;
    let report: DashboardReport = serde_json::from_reader(BufReader::new(file))?;

    debug!(
        "Report loaded: version {}, generated {}",
        report.version, report.generated_at
    );

    Ok(report)
}
