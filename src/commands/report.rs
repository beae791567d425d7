//! Report command implementation.
//!
//! The report command:
//! 1. Loads the display configuration
//! 2. Loads the dataset
//! 3. Applies the filter selection
//! 4. Builds the dashboard report
//! 5. Writes output files

use super::models::ReportArgs;
use crate::dataset::{Attribute, DatasetHandle, Flow};
use crate::filter::Selection;
use crate::output::{render_summary, write_report, write_rows_csv};
use crate::presentation::try_load_boundaries;
use crate::report::{build_report, MapRequest};
use crate::utils::config::{load_config, DashboardConfig};
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the report command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Report command arguments
///
/// # Returns
/// Ok if the report was written, Err with context if any step fails
///
/// # Errors
/// * Unreadable configuration
/// * Dataset load failures
/// * Unparseable filter choices
/// * File write errors
///
/// # Example
/// ```ignore
/// let args = ReportArgs {
///     data: PathBuf::from("dados.csv"),
///     years: vec!["2021".to_string()],
///     flows: vec!["Exportação".to_string()],
///     output: PathBuf::from("report.json"),
///     print_summary: true,
///     ..Default::default()
/// };
///
/// execute_report(args)?;
/// ```
pub fn execute_report(args: ReportArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Starting report for dataset: {}", args.data.display());

    // Step 1: Configuration
    info!("Step 1/5: Loading configuration...");
    let config = resolve_config(&args)?;

    // Step 2: Dataset
    info!("Step 2/5: Loading dataset...");
    let handle = DatasetHandle::new(&args.data);
    let dataset = handle
        .get()
        .with_context(|| format!("Failed to load dataset {}", args.data.display()))?;

    // Step 3: Selection
    info!("Step 3/5: Applying filters...");
    let selection = build_selection(&args)?;
    let view = selection.apply(dataset.records());

    debug!("Selection: {:?}", selection.describe());
    info!("{} of {} records selected", view.len(), dataset.len());

    // Step 4: Report
    info!("Step 4/5: Building report...");
    let boundaries = args
        .geojson
        .as_ref()
        .and_then(|path| try_load_boundaries(path, &config.geo_name_property));

    let map_request = MapRequest {
        year: args.map_year,
        flow: args
            .map_flow
            .parse::<Flow>()
            .context("Invalid map flow")?,
    };

    let report = build_report(
        dataset,
        &selection,
        &config,
        &map_request,
        boundaries.as_ref(),
    );

    if let Some(summary) = &report.summary {
        info!("Summary: {}", summary.summary());
    }

    // Step 5: Outputs
    info!("Step 5/5: Writing output files...");
    write_report(&report, &args.output).context("Failed to write report JSON")?;

    info!("✓ Report written to: {}", args.output.display());

    if let Some(rows_path) = &args.rows {
        write_rows_csv(&view, rows_path).context("Failed to write filtered rows")?;

        info!("✓ Rows written to: {}", rows_path.display());
    }

    if args.print_summary {
        println!("{}", render_summary(&report));
    }

    let elapsed = start_time.elapsed();
    info!("Report completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Configuration file (or defaults) with command-line overrides applied
///
/// **Public** - shared with the options command
pub fn resolve_config(args: &ReportArgs) -> Result<DashboardConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DashboardConfig::default(),
    };

    if let Some(top) = args.top {
        config = config.with_top_entities(top);
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Turn the textual filter choices into a selection
///
/// **Public** - useful for tests and other front ends
pub fn build_selection(args: &ReportArgs) -> Result<Selection> {
    let choices = [
        (Attribute::Year, &args.years),
        (Attribute::Flow, &args.flows),
        (Attribute::Municipality, &args.municipalities),
        (Attribute::Country, &args.countries),
        (Attribute::Section, &args.sections),
        (Attribute::Product, &args.products),
    ];

    let mut selection = Selection::new();
    for (attribute, values) in choices {
        selection = selection
            .with_choices(attribute, values)
            .with_context(|| format!("Invalid {} filter", attribute))?;
    }

    Ok(selection)
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
///
/// # Arguments
/// * `args` - Arguments to validate
///
/// # Returns
/// Ok if arguments are valid, Err with message if not
pub fn validate_args(args: &ReportArgs) -> Result<()> {
    if args.data.as_os_str().is_empty() {
        anyhow::bail!("Dataset path cannot be empty");
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.top == Some(0) {
        anyhow::bail!("top must be greater than 0");
    }

    if let Some(year) = args.map_year {
        if !(1900..=2100).contains(&year) {
            anyhow::bail!("Map year {} is out of range", year);
        }
    }

    args.map_flow
        .parse::<Flow>()
        .context("Map flow must be export or import")?;

    // Parse the filters early so typos fail before the dataset is read
    build_selection(args)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::FieldValue;
    use std::path::PathBuf;

    fn args() -> ReportArgs {
        ReportArgs {
            data: PathBuf::from("dados.csv"),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_args_valid() {
        assert!(validate_args(&args()).is_ok());
    }

    #[test]
    fn test_validate_args_empty_data() {
        let args = ReportArgs {
            data: PathBuf::new(),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_output() {
        let args = ReportArgs {
            output: PathBuf::new(),
            ..args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_top_zero() {
        let args = ReportArgs {
            top: Some(0),
            ..args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_bad_map_flow() {
        let args = ReportArgs {
            map_flow: "transit".to_string(),
            ..args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_bad_year_filter() {
        let args = ReportArgs {
            years: vec!["vinte".to_string()],
            ..args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_build_selection_all_sentinel() {
        let args = ReportArgs {
            years: vec!["2021".to_string(), "2022".to_string()],
            flows: vec!["Todos".to_string()],
            municipalities: vec!["Teresina".to_string()],
            ..args()
        };

        let selection = build_selection(&args).unwrap();

        assert!(!selection.is_active(Attribute::Flow));
        assert_eq!(selection.allowed(Attribute::Year).map(|s| s.len()), Some(2));
        assert!(selection
            .allowed(Attribute::Municipality)
            .unwrap()
            .contains(&FieldValue::text("Teresina")));
    }

    #[test]
    fn test_resolve_config_override() {
        let args = ReportArgs {
            top: Some(3),
            ..args()
        };
        assert_eq!(resolve_config(&args).unwrap().top_entities, 3);
    }
}
