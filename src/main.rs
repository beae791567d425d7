//! Comex Dashboard CLI
//!
//! Builds foreign-trade dashboard reports for the municipalities of Piauí
//! from a Comex Stat export.

use anyhow::Result;
use clap::{Parser, Subcommand};
use comex_dashboard::commands::{
    display_schema, display_version, execute_report, print_options, resolve_config,
    validate_args, validate_report_file, ReportArgs,
};
use env_logger::Env;
use std::path::PathBuf;

/// Comex Dashboard - foreign-trade analytics for Piauí
#[derive(Parser, Debug)]
#[command(name = "comex-dashboard")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a dashboard report for a filter selection
    Report {
        /// Dataset file (CSV or JSON)
        #[arg(short, long, env = "COMEX_DATA")]
        data: PathBuf,

        /// TOML file with display limits
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Years to keep (repeatable, "Todos" for all)
        #[arg(long = "year")]
        years: Vec<String>,

        /// Flows to keep: export, import, Exportação, Importação
        #[arg(long = "flow")]
        flows: Vec<String>,

        /// Municipalities to keep (repeatable)
        #[arg(long = "municipality")]
        municipalities: Vec<String>,

        /// Partner countries to keep (repeatable)
        #[arg(long = "country")]
        countries: Vec<String>,

        /// Product sections to keep (repeatable)
        #[arg(long = "section")]
        sections: Vec<String>,

        /// SH4 product descriptions to keep (repeatable)
        #[arg(long = "product")]
        products: Vec<String>,

        /// Number of entities in rankings
        #[arg(long)]
        top: Option<usize>,

        /// GeoJSON municipal boundaries for the map
        #[arg(long)]
        geojson: Option<PathBuf>,

        /// Year shown on the map (earliest when omitted)
        #[arg(long)]
        map_year: Option<i32>,

        /// Flow shown on the map
        #[arg(long, default_value = "export")]
        map_flow: String,

        /// Output path for JSON report
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// Output path for the filtered rows as CSV (optional)
        #[arg(long)]
        rows: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Print the filter choices available in a dataset
    Options {
        /// Dataset file (CSV or JSON)
        #[arg(short, long, env = "COMEX_DATA")]
        data: PathBuf,

        /// TOML file with display limits
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Report {
            data,
            config,
            years,
            flows,
            municipalities,
            countries,
            sections,
            products,
            top,
            geojson,
            map_year,
            map_flow,
            output,
            rows,
            summary,
        } => {
            let args = ReportArgs {
                data,
                config,
                years,
                flows,
                municipalities,
                countries,
                sections,
                products,
                top,
                geojson,
                map_year,
                map_flow,
                output,
                rows,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_report(args)?;
        }

        Commands::Options { data, config } => {
            let args = ReportArgs {
                data,
                config,
                ..Default::default()
            };
            let config = resolve_config(&args)?;
            print_options(&args.data, &config)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
