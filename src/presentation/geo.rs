//! Municipal map view with a bar-chart fallback.
//!
//! The pipeline only emits (municipality, value) pairs. This adapter joins
//! them by name to a GeoJSON boundary set; when the boundaries are missing
//! or match no municipality the map degrades to a descending bar chart.

use super::charts::{BarChart, Orientation};
use crate::aggregator::Group;
use crate::utils::config::{DashboardConfig, MapCenter};
use crate::utils::error::GeoError;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Municipality names available in a boundary file
#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySet {
    property: String,
    // normalized name -> name as written in the file
    names: BTreeMap<String, String>,
}

impl BoundarySet {
    /// Collect names from a GeoJSON FeatureCollection
    ///
    /// Features without the name property are skipped.
    pub fn from_geojson(value: &serde_json::Value, property: &str) -> Result<Self, GeoError> {
        let features = value
            .get("features")
            .and_then(|f| f.as_array())
            .ok_or_else(|| {
                GeoError::InvalidFormat("expected a FeatureCollection with 'features'".to_string())
            })?;

        let mut names = BTreeMap::new();
        let mut skipped = 0usize;

        for feature in features {
            match feature
                .get("properties")
                .and_then(|p| p.get(property))
                .and_then(|n| n.as_str())
            {
                Some(name) => {
                    names.insert(normalize_name(name), name.to_string());
                }
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!("{} boundary features have no '{}' property", skipped, property);
        }

        debug!("Loaded {} municipal boundaries", names.len());

        Ok(Self {
            property: property.to_string(),
            names,
        })
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn contains(&self, municipality: &str) -> bool {
        self.names.contains_key(&normalize_name(municipality))
    }

    /// Name as spelled in the boundary file
    pub fn canonical_name(&self, municipality: &str) -> Option<&str> {
        self.names.get(&normalize_name(municipality)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Read a GeoJSON boundary file
///
/// # Errors
/// * `GeoError::Io` - File cannot be opened
/// * `GeoError::Json` - File is not JSON
/// * `GeoError::InvalidFormat` - JSON is not a FeatureCollection
pub fn load_boundaries(path: impl AsRef<Path>, property: &str) -> Result<BoundarySet, GeoError> {
    let path = path.as_ref();
    info!("Loading municipal boundaries from: {}", path.display());

    let file = File::open(path)?;
    let value: serde_json::Value = serde_json::from_reader(BufReader::new(file))?;
    BoundarySet::from_geojson(&value, property)
}

/// Boundary set if the file loads, `None` (with a warning) otherwise
pub fn try_load_boundaries(path: impl AsRef<Path>, property: &str) -> Option<BoundarySet> {
    let path = path.as_ref();
    match load_boundaries(path, property) {
        Ok(boundaries) => Some(boundaries),
        Err(e) => {
            warn!(
                "Boundary file {} unavailable ({}), map will fall back to bars",
                path.display(),
                e
            );
            None
        }
    }
}

/// Case-insensitive, whitespace-trimmed join key
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub municipality: String,
    pub value: f64,
    /// Whether a boundary exists for this municipality
    pub matched: bool,
}

/// What the map panel should draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapView {
    Choropleth {
        title: String,
        center: MapCenter,
        zoom: u8,
        /// Feature property path to join on, e.g. `properties.nome`
        feature_key: String,
        regions: Vec<MapRegion>,
    },
    Bars {
        chart: BarChart,
    },
}

impl MapView {
    pub fn is_choropleth(&self) -> bool {
        matches!(self, MapView::Choropleth { .. })
    }
}

/// Build the map panel from per-municipality totals
pub fn map_view(
    title: impl Into<String>,
    totals: Vec<Group>,
    boundaries: Option<&BoundarySet>,
    config: &DashboardConfig,
) -> MapView {
    let title = title.into();

    let Some(boundaries) = boundaries else {
        debug!("No boundaries, drawing bar chart");
        return MapView::Bars {
            chart: BarChart::from_groups(title, totals, Orientation::Vertical, None),
        };
    };

    let regions: Vec<MapRegion> = totals
        .iter()
        .map(|g| {
            let name = g.label();
            MapRegion {
                municipality: boundaries
                    .canonical_name(&name)
                    .map(str::to_string)
                    .unwrap_or(name),
                value: g.value,
                matched: boundaries.contains(&g.label()),
            }
        })
        .collect();

    let matched = regions.iter().filter(|r| r.matched).count();

    if matched == 0 {
        warn!(
            "None of {} municipalities match the boundary file, drawing bar chart",
            regions.len()
        );
        return MapView::Bars {
            chart: BarChart::from_groups(title, totals, Orientation::Vertical, None),
        };
    }

    if matched < regions.len() {
        warn!(
            "{} of {} municipalities have no boundary",
            regions.len() - matched,
            regions.len()
        );
    }

    MapView::Choropleth {
        title,
        center: config.map_center,
        zoom: config.map_zoom,
        feature_key: format!("properties.{}", boundaries.property()),
        regions,
    }
}
