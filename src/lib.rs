//! Comex Dashboard
//!
//! Foreign-trade analytics for the municipalities of Piauí: filter the
//! Comex Stat export, aggregate it, and shape the result into
//! chart-ready dashboard reports.
//!
//! This crate provides the core implementation for the
//! `comex-dashboard` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! comex-dashboard report --data dados.csv --year 2021 --summary
//! comex-dashboard --help
//! ```
//!
//! The pipeline is load → filter → aggregate → present:
//!
//! ```ignore
//! let dataset = dataset::load_dataset("dados.csv")?;
//! let selection = filter::Selection::new().with_years([2021]);
//! let report = report::build_report(
//!     &dataset,
//!     &selection,
//!     &utils::config::DashboardConfig::default(),
//!     &report::MapRequest::default(),
//!     None,
//! );
//! ```

pub mod aggregator;
pub mod commands;
pub mod dataset;
pub mod filter;
pub mod output;
pub mod presentation;
pub mod report;
pub mod utils;
