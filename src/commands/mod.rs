//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod report;
pub mod utils;

// Re-export main command functions
pub use models::ReportArgs;
pub use report::{build_selection, execute_report, resolve_config, validate_args};
pub use utils::{display_schema, display_version, print_options, validate_report_file};
