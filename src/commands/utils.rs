use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use crate::dataset::shared;
use crate::filter::filter_options;
use crate::output::read_report;
use crate::presentation::format_currency;
use crate::utils::config::{
    DashboardConfig, COLUMN_COUNTRY, COLUMN_FLOW, COLUMN_FOB_VALUE, COLUMN_MUNICIPALITY,
    COLUMN_NET_WEIGHT, COLUMN_PRODUCT, COLUMN_SECTION, COLUMN_VALUE_PER_KG, COLUMN_YEAR,
    DATA_SOURCE, SCHEMA_VERSION,
};

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)
        .with_context(|| format!("Failed to read report {}", file_path.display()))?;

    if report.version != SCHEMA_VERSION {
        println!(
            "⚠ Schema version {} differs from current {}",
            report.version, SCHEMA_VERSION
        );
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Generated: {}", report.generated_at);
    println!("  Source: {}", report.dataset_info.source);
    println!("  Has data: {}", report.has_data());
    println!("  Filters: {}", report.selection.len());

    if let Some(summary) = &report.summary {
        println!("  Records: {}", summary.records);
        println!("  Balance: {}", format_currency(summary.balance));
    }

    Ok(())
}

/// Print the filter choices of a dataset as JSON
pub fn print_options(data: &Path, config: &DashboardConfig) -> Result<()> {
    let dataset = shared(data)
        .with_context(|| format!("Failed to load dataset {}", data.display()))?;

    let options = filter_options(&dataset.view(), config.filter_option_limit);
    println!("{}", serde_json::to_string_pretty(&options)?);

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Comex Dashboard Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Dataset Columns ({} export):", DATA_SOURCE);
        for column in [
            COLUMN_YEAR,
            COLUMN_FLOW,
            COLUMN_MUNICIPALITY,
            COLUMN_COUNTRY,
            COLUMN_SECTION,
            COLUMN_PRODUCT,
            COLUMN_FOB_VALUE,
            COLUMN_NET_WEIGHT,
        ] {
            println!("  {}", column);
        }
        println!("  {} (derived, written with --rows)", COLUMN_VALUE_PER_KG);
        println!();
        println!("Report Structure:");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  generated_at: string     - ISO 8601 timestamp");
        println!("  status: string           - 'ok' or 'no_data'");
        println!("  selection: object        - Active filters by attribute");
        println!("  dataset_info: object     - Size and year range of the dataset");
        println!("  summary: object?         - Export, import, balance, value per kg");
        println!("  overview: object?        - Yearly flows, flow and section shares");
        println!("  geography: object?       - Top municipalities, countries, heatmap");
        println!("  products: object?        - Top products, value per kg by section");
        println!("  temporal: object?        - Evolution by flow, product, country");
        println!("  value_added: object?     - Value per kg by municipality");
        println!("  map: object              - 'choropleth' or 'bars' for one year/flow");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Comex Dashboard v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Foreign-trade dashboard data for the municipalities of Piauí.");
    println!("Data source: {}", DATA_SOURCE);
}
