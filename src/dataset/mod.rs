//! Trade dataset loading and schema.
//!
//! This module handles:
//! - Reading the CSV/JSON export of the source spreadsheet
//! - Validating rows and deriving value per kilogram
//! - Holding the loaded records behind a load-once handle

pub mod cache;
pub mod loader;
pub mod schema;

// Re-export main types
pub use cache::{shared, DatasetHandle};
pub use loader::{load_dataset, read_csv_records, read_json_records, DatasetFormat};
pub use schema::{Attribute, FieldValue, Flow, Measure, TradeRecord};

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// The immutable record set of one session
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<TradeRecord>,
    source: PathBuf,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Build a dataset from records already in memory
    pub fn from_records(records: Vec<TradeRecord>) -> Self {
        Self {
            records,
            source: PathBuf::new(),
            loaded_at: Utc::now(),
        }
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    /// Borrowed view over every record
    pub fn view(&self) -> Vec<&TradeRecord> {
        self.records.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Distinct years present, ascending
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
