//! Presentation adapters: aggregation output shaped for display.
//!
//! This module handles:
//! - Label truncation and number formatting
//! - Fixed flow colours
//! - Chart structures in drawing order
//! - The municipal map and its bar-chart fallback

pub mod charts;
pub mod format;
pub mod geo;
pub mod labels;
pub mod palette;

// Re-export main types and functions
pub use charts::{
    Bar, BarChart, HeatmapChart, Orientation, PieChart, ScatterChart, ScatterPoint, Series,
    SeriesChart, SeriesKind, Slice, YearPoint,
};
pub use format::{format_currency, format_number, format_optional_currency};
pub use geo::{load_boundaries, map_view, try_load_boundaries, BoundarySet, MapRegion, MapView};
pub use labels::truncate_label;
pub use palette::{color_for, flow_color};
