use std::path::PathBuf;

/// Arguments for the report command
///
/// **Public** - used by main.rs to construct from CLI args
///
/// Filter choices are kept as typed by the user and parsed when the
/// selection is built, so `Todos` and friends work for every attribute.
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// Dataset file (CSV or JSON)
    pub data: PathBuf,

    /// Optional TOML file with display limits
    pub config: Option<PathBuf>,

    pub years: Vec<String>,
    pub flows: Vec<String>,
    pub municipalities: Vec<String>,
    pub countries: Vec<String>,
    pub sections: Vec<String>,
    pub products: Vec<String>,

    /// Override for the number of entities in rankings
    pub top: Option<usize>,

    /// GeoJSON municipal boundaries for the map panel
    pub geojson: Option<PathBuf>,

    /// Year shown on the map (earliest when absent)
    pub map_year: Option<i32>,

    /// Flow shown on the map
    pub map_flow: String,

    /// Output path for the JSON report
    pub output: PathBuf,

    /// Output path for the filtered rows as CSV (optional)
    pub rows: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            data: PathBuf::new(),
            config: None,
            years: Vec::new(),
            flows: Vec::new(),
            municipalities: Vec::new(),
            countries: Vec::new(),
            sections: Vec::new(),
            products: Vec::new(),
            top: None,
            geojson: None,
            map_year: None,
            map_flow: "export".to_string(),
            output: PathBuf::from("report.json"),
            rows: None,
            print_summary: false,
        }
    }
}
