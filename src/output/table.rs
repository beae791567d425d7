//! Filtered rows as CSV.

use super::prepare_output_path;
use crate::dataset::TradeRecord;
use crate::utils::error::OutputError;
use log::info;
use std::io::Write;
use std::path::Path;

/// Write records with the dataset's column headers
///
/// `Valor por kg` is left blank for records without a defined value per kg.
pub fn write_rows_to<W: Write>(records: &[&TradeRecord], writer: W) -> Result<(), OutputError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for record in records {
        csv_writer.serialize(record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write records to a CSV file
///
/// **Public** - backs `report --rows`
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent cannot be created
/// * `OutputError::CsvFailed` - Row serialization failed
pub fn write_rows_csv(
    records: &[&TradeRecord],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!(
        "Writing {} rows to: {}",
        records.len(),
        output_path.display()
    );

    prepare_output_path(output_path)?;
    let file = std::fs::File::create(output_path)?;
    write_rows_to(records, file)
}
