//! Dashboard report assembly and its serialized form.

pub mod builder;
pub mod schema;

pub use builder::{build_report, MapRequest};
pub use schema::{
    DashboardReport, GeographySection, OverviewSection, ProductSection, ReportStatus,
    TemporalSection, ValueAddedRow, ValueAddedSection,
};
