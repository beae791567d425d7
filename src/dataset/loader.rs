//! Dataset loading from CSV or JSON exports of the source spreadsheet.
//!
//! Rows are deserialized into a raw shape first, then validated and
//! normalized into `TradeRecord`s (integer years, parsed flows, derived
//! value per kilogram). Any malformed row aborts the load.

use super::schema::{Flow, TradeRecord};
use super::Dataset;
use crate::utils::error::LoadError;
use chrono::Utc;
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Supported on-disk dataset formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Csv,
    Json,
}

impl DatasetFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" | "txt" => Ok(DatasetFormat::Csv),
            "json" => Ok(DatasetFormat::Json),
            "" => Err(LoadError::UnsupportedFormat(format!(
                "{} has no extension",
                path.display()
            ))),
            other => Err(LoadError::UnsupportedFormat(format!(
                ".{} (export the spreadsheet to CSV)",
                other
            ))),
        }
    }
}

/// Year cell as it may appear in exports ("2021", 2021 or 2021.0)
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YearCell {
    Int(i64),
    Float(f64),
    Text(String),
}

/// A row as it appears in the source file
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Ano", alias = "year")]
    year: YearCell,

    #[serde(rename = "Fluxo", alias = "flow")]
    flow: String,

    #[serde(rename = "Município", alias = "municipality")]
    municipality: String,

    #[serde(rename = "País", alias = "country")]
    country: String,

    #[serde(rename = "Descrição Seção", alias = "section")]
    section: String,

    #[serde(rename = "Descrição SH4", alias = "product")]
    product: String,

    #[serde(rename = "Valor US$ FOB", alias = "fob_value")]
    fob_value: f64,

    #[serde(rename = "Quilograma Líquido", alias = "net_weight_kg")]
    net_weight_kg: f64,
}

/// Load the dataset at `path`
///
/// **Public** - main entry point for loading
///
/// # Errors
/// * `LoadError::NotFound` - The file does not exist
/// * `LoadError::UnsupportedFormat` - Extension is neither CSV nor JSON
/// * `LoadError::Csv` / `LoadError::Json` - Structural parse failures
/// * `LoadError::InvalidRecord` - A CSV row failed validation
/// * `LoadError::InvalidRow` - A JSON row failed validation
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
    let path = path.as_ref();

    info!("Loading dataset from: {}", path.display());

    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let format = DatasetFormat::from_path(path)?;
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let records = match format {
        DatasetFormat::Csv => read_csv_records(reader)?,
        DatasetFormat::Json => read_json_records(reader)?,
    };

    if records.is_empty() {
        warn!("Dataset {} contains no records", path.display());
    }

    info!("Loaded {} records", records.len());

    Ok(Dataset {
        records,
        source: path.to_path_buf(),
        loaded_at: Utc::now(),
    })
}

/// Read records from CSV with a header row
pub fn read_csv_records<R: Read>(reader: R) -> Result<Vec<TradeRecord>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for result in csv_reader.records() {
        let row = result?;
        // Line where the record starts, so quoted multi-line fields count
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let raw: RawRecord = row.deserialize(Some(&headers))?;
        let record = normalize_record(raw)
            .map_err(|message| LoadError::InvalidRecord { line, message })?;
        records.push(record);
    }

    debug!("Parsed {} CSV rows", records.len());

    Ok(records)
}

/// Read records from a JSON array of row objects
pub fn read_json_records<R: Read>(reader: R) -> Result<Vec<TradeRecord>, LoadError> {
    let raw: Vec<RawRecord> = serde_json::from_reader(reader)?;

    debug!("Parsed {} JSON rows", raw.len());

    raw.into_iter()
        .enumerate()
        .map(|(idx, raw)| {
            normalize_record(raw).map_err(|message| LoadError::InvalidRow {
                row: idx + 1,
                message,
            })
        })
        .collect()
}

/// Validate a raw row and derive computed columns
///
/// **Private** - internal helper for the readers; the caller attaches the
/// row's location to the message
fn normalize_record(raw: RawRecord) -> Result<TradeRecord, String> {
    let year = parse_year(&raw.year).ok_or_else(|| format!("invalid year {:?}", raw.year))?;

    let flow: Flow = raw
        .flow
        .parse()
        .map_err(|_| format!("unknown flow '{}'", raw.flow))?;

    check_amount("FOB value", raw.fob_value)?;
    check_amount("net weight", raw.net_weight_kg)?;

    Ok(TradeRecord::new(year, flow, raw.fob_value, raw.net_weight_kg)
        .with_place(raw.municipality, raw.country)
        .with_product(raw.section, raw.product))
}

fn parse_year(cell: &YearCell) -> Option<i32> {
    match cell {
        YearCell::Int(year) => i32::try_from(*year).ok(),
        YearCell::Float(year) if year.fract() == 0.0 && year.is_finite() => {
            i32::try_from(*year as i64).ok()
        }
        YearCell::Float(_) => None,
        YearCell::Text(text) => {
            let text = text.trim();
            text.parse::<i32>()
                .ok()
                .or_else(|| text.strip_suffix(".0").and_then(|t| t.parse().ok()))
        }
    }
}

fn check_amount(name: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() {
        return Err(format!("{} is not a finite number", name));
    }
    if value < 0.0 {
        return Err(format!("{} cannot be negative ({})", name, value));
    }
    Ok(())
}
