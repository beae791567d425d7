//! Configuration and constants for the dashboard.
//!
//! Constants describe the dataset and report formats. `DashboardConfig`
//! holds the tunable display limits and can be loaded from a TOML file.

use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Label of the synthetic overflow group produced by top-N aggregation
pub const OTHER_LABEL: &str = "Outros";

/// Overflow label used by the section distribution chart
pub const OTHER_SECTIONS_LABEL: &str = "Outras Seções";

/// Marker appended to truncated labels
pub const ELLIPSIS: &str = "...";

/// Choices that mean "every value" in a list of textual filter choices
pub const ALL_SENTINELS: &[&str] = &["todos", "todas", "all"];

// Fixed chart colours for the two flow values
pub const EXPORT_COLOR: &str = "#2E86C1";
pub const IMPORT_COLOR: &str = "#E74C3C";

// Column headers of the source spreadsheet ("Resultado" sheet)
pub const COLUMN_YEAR: &str = "Ano";
pub const COLUMN_FLOW: &str = "Fluxo";
pub const COLUMN_MUNICIPALITY: &str = "Município";
pub const COLUMN_COUNTRY: &str = "País";
pub const COLUMN_SECTION: &str = "Descrição Seção";
pub const COLUMN_PRODUCT: &str = "Descrição SH4";
pub const COLUMN_FOB_VALUE: &str = "Valor US$ FOB";
pub const COLUMN_NET_WEIGHT: &str = "Quilograma Líquido";
pub const COLUMN_VALUE_PER_KG: &str = "Valor por kg";

/// Data source credited in the report
pub const DATA_SOURCE: &str = "Comex Stat";

/// Tunable display limits for the dashboard report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Bars shown in the top municipality/country/product charts
    pub top_entities: usize,

    /// Maximum slices in the section distribution before an overflow slice
    pub section_slices: usize,

    /// Municipalities and countries offered as filter choices
    pub filter_option_limit: usize,

    /// Municipalities shown in the value-per-kg ranking
    pub value_per_kg_top: usize,

    /// Series drawn in the product/country evolution charts
    pub evolution_top: usize,

    /// Character budget for bar chart labels
    pub long_label_chars: usize,

    /// Character budget for line chart legends
    pub short_label_chars: usize,

    /// Distinct values on either heatmap axis above which it is restricted
    pub heatmap_threshold: usize,

    /// Rows and columns kept when the heatmap is restricted
    pub heatmap_top_k: usize,

    /// GeoJSON feature property holding the municipality name
    pub geo_name_property: String,

    /// Initial map centre
    pub map_center: MapCenter,

    /// Initial map zoom level
    pub map_zoom: u8,
}

/// Geographic centre of the map view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapCenter {
    pub lat: f64,
    pub lon: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_entities: 10,
            section_slices: 10,
            filter_option_limit: 15,
            value_per_kg_top: 15,
            evolution_top: 5,
            long_label_chars: 50,
            short_label_chars: 30,
            heatmap_threshold: 20,
            heatmap_top_k: 10,
            geo_name_property: "nome".to_string(),
            map_center: MapCenter {
                lat: -7.7,
                lon: -42.7,
            },
            map_zoom: 6,
        }
    }
}

impl DashboardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top_entities(mut self, n: usize) -> Self {
        self.top_entities = n;
        self
    }

    /// Reject limits that would make every chart empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("top_entities", self.top_entities),
            ("section_slices", self.section_slices),
            ("filter_option_limit", self.filter_option_limit),
            ("value_per_kg_top", self.value_per_kg_top),
            ("evolution_top", self.evolution_top),
            ("long_label_chars", self.long_label_chars),
            ("short_label_chars", self.short_label_chars),
            ("heatmap_top_k", self.heatmap_top_k),
        ];

        for (name, value) in limits {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{} must be greater than 0", name)));
            }
        }

        if self.geo_name_property.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "geo_name_property cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Load dashboard configuration from a TOML file
///
/// Missing keys fall back to their defaults.
///
/// # Errors
/// * `ConfigError::Io` - If the file cannot be read
/// * `ConfigError::Parse` - If the TOML is invalid
/// * `ConfigError::Invalid` - If a limit is zero
///
/// # Example
/// ```ignore
/// let config = load_config("dashboard.toml")?;
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<DashboardConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: DashboardConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}
