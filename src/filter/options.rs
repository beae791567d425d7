//! Choices offered to a user for each filter.

use crate::aggregator::{sum_by, top_n};
use crate::dataset::{Attribute, Flow, Measure, TradeRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Filter choices derived from the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Every year, ascending
    pub years: Vec<i32>,

    /// Flows present in the data
    pub flows: Vec<Flow>,

    /// Largest municipalities by FOB value
    pub municipalities: Vec<String>,

    /// Largest partner countries by FOB value
    pub countries: Vec<String>,

    /// Every product section, alphabetical
    pub sections: Vec<String>,
}

/// Build filter choices, limiting municipalities and countries to `limit`
pub fn filter_options(records: &[&TradeRecord], limit: usize) -> FilterOptions {
    let years: BTreeSet<i32> = records.iter().map(|r| r.year).collect();
    let flows: BTreeSet<Flow> = records.iter().map(|r| r.flow).collect();
    let sections: BTreeSet<&str> = records.iter().map(|r| r.section.as_str()).collect();

    FilterOptions {
        years: years.into_iter().collect(),
        flows: flows.into_iter().collect(),
        municipalities: largest(records, Attribute::Municipality, limit),
        countries: largest(records, Attribute::Country, limit),
        sections: sections.into_iter().map(str::to_string).collect(),
    }
}

fn largest(records: &[&TradeRecord], attribute: Attribute, limit: usize) -> Vec<String> {
    top_n(sum_by(records, attribute, Measure::FobValue), limit)
        .into_iter()
        .map(|g| g.label())
        .collect()
}
