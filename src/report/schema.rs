//! Output JSON schema for dashboard reports.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::aggregator::{DatasetInfo, TradeSummary};
use crate::presentation::{BarChart, HeatmapChart, MapView, PieChart, ScatterChart, SeriesChart};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether the selection left anything to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Ok,
    NoData,
}

/// Top-level report structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    pub status: ReportStatus,

    /// Active filters, attribute name -> allowed values
    pub selection: BTreeMap<String, Vec<String>>,

    /// Facts about the whole dataset
    pub dataset_info: DatasetInfo,

    /// Metric cards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<TradeSummary>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<OverviewSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geography: Option<GeographySection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<ProductSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal: Option<TemporalSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_added: Option<ValueAddedSection>,

    /// Municipal map for one year and flow over the whole dataset
    pub map: MapView,
}

impl DashboardReport {
    pub fn has_data(&self) -> bool {
        self.status == ReportStatus::Ok
    }
}

/// Yearly evolution and distributions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewSection {
    pub yearly_by_flow: SeriesChart,
    pub flow_distribution: PieChart,
    pub section_distribution: PieChart,
}

/// Rankings of municipalities and partner countries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeographySection {
    pub top_municipalities: BarChart,
    pub top_countries: BarChart,
    pub municipality_country: HeatmapChart,
}

/// Product rankings and value density
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSection {
    pub top_products: BarChart,
    pub value_per_kg_by_section: BarChart,
    pub value_weight_scatter: ScatterChart,
}

/// Evolution over the years
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalSection {
    pub value_by_flow: SeriesChart,
    pub top_products: SeriesChart,
    pub top_countries: SeriesChart,
}

/// Value-per-kg analysis by municipality
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueAddedSection {
    pub top_municipalities: BarChart,
    pub value_weight_scatter: ScatterChart,
    /// Records with a defined value per kg, highest first
    pub rows: Vec<ValueAddedRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueAddedRow {
    pub municipality: String,
    pub year: i32,
    pub flow: String,
    pub fob_value: f64,
    pub net_weight_kg: f64,
    pub value_per_kg: f64,
}
