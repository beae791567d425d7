//! Headline metrics over a filtered view.
//!
//! Totals by flow, trade balance, weight, average value per kilogram and
//! distinct counts. These back the metric cards at the top of the report.

use super::group::{distinct_count, total};
use crate::dataset::{Attribute, Dataset, Flow, Measure, TradeRecord};
use crate::utils::config::DATA_SOURCE;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Summary statistics for a view
///
/// **Public** - returned from calculate_summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeSummary {
    /// FOB value of export records
    pub total_export: f64,

    /// FOB value of import records
    pub total_import: f64,

    /// Exports minus imports
    pub balance: f64,

    /// FOB value of every record
    pub total_value: f64,

    /// Net weight of every record, in kg
    pub total_weight_kg: f64,

    /// Total value over total weight, `None` when the weight is zero
    pub average_value_per_kg: Option<f64>,

    pub records: usize,
    pub municipalities: usize,
    pub countries: usize,
    pub products: usize,
    pub sections: usize,

    /// Years present, ascending
    pub years: Vec<i32>,
}

impl TradeSummary {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Export: {:.2} | Import: {:.2} | Balance: {:.2} | Records: {} | Municipalities: {}",
            self.total_export, self.total_import, self.balance, self.records, self.municipalities
        )
    }
}

/// FOB value of the records with the given flow
pub fn total_by_flow(records: &[&TradeRecord], flow: Flow) -> f64 {
    records
        .iter()
        .filter(|r| r.flow == flow)
        .map(|r| r.fob_value)
        .sum()
}

/// Export total minus import total
pub fn balance(records: &[&TradeRecord]) -> f64 {
    total_by_flow(records, Flow::Export) - total_by_flow(records, Flow::Import)
}

/// Calculate summary statistics for a view
///
/// **Public** - main entry point for metrics calculation
pub fn calculate_summary(records: &[&TradeRecord]) -> TradeSummary {
    let total_export = total_by_flow(records, Flow::Export);
    let total_import = total_by_flow(records, Flow::Import);
    let total_value = total(records, Measure::FobValue);
    let total_weight_kg = total(records, Measure::NetWeight);

    let average_value_per_kg = if total_weight_kg > 0.0 {
        Some(total_value / total_weight_kg).filter(|v| v.is_finite())
    } else {
        None
    };

    let years: BTreeSet<i32> = records.iter().map(|r| r.year).collect();

    let summary = TradeSummary {
        total_export,
        total_import,
        balance: total_export - total_import,
        total_value,
        total_weight_kg,
        average_value_per_kg,
        records: records.len(),
        municipalities: distinct_count(records, Attribute::Municipality),
        countries: distinct_count(records, Attribute::Country),
        products: distinct_count(records, Attribute::Product),
        sections: distinct_count(records, Attribute::Section),
        years: years.into_iter().collect(),
    };

    debug!("Summary: {}", summary.summary());

    summary
}

/// Facts about the whole dataset, independent of the selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// Publisher of the data
    pub source: String,
    /// File the dataset was read from, empty for in-memory data
    pub file: String,
    pub records: usize,
    pub municipalities: usize,
    pub countries: usize,
    pub products: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub loaded_at: String,
}

/// Describe the full dataset
pub fn dataset_info(dataset: &Dataset) -> DatasetInfo {
    let view = dataset.view();
    let years = dataset.years();

    DatasetInfo {
        source: DATA_SOURCE.to_string(),
        file: dataset.source().display().to_string(),
        records: dataset.len(),
        municipalities: distinct_count(&view, Attribute::Municipality),
        countries: distinct_count(&view, Attribute::Country),
        products: distinct_count(&view, Attribute::Product),
        first_year: years.first().copied(),
        last_year: years.last().copied(),
        loaded_at: dataset.loaded_at().to_rfc3339(),
    }
}
