//! Aggregation of filtered trade records into groups and metrics.
//!
//! This module transforms a filtered view into:
//! - Grouped reductions (sum, mean, count, distinct count)
//! - Ranked groups with an overflow bucket
//! - Dense matrices for heatmaps
//! - Headline summary statistics

pub mod group;
pub mod matrix;
pub mod metrics;
pub mod rank;

// Re-export main types and functions
pub use group::{distinct_count, group_by, sum_by, total, Group, Reduction};
pub use matrix::{heatmap, Matrix};
pub use metrics::{
    balance, calculate_summary, dataset_info, total_by_flow, DatasetInfo, TradeSummary,
};
pub use rank::{sort_ascending, sort_descending, top_n, top_n_with_other};
