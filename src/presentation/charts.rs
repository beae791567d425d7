//! Chart-ready structures built from aggregation output.
//!
//! Each type carries exactly what a plotting front end needs: display
//! labels, values in drawing order, and fixed colours where they apply.

use super::labels::truncate_label;
use super::palette::color_for;
use crate::aggregator::{sort_ascending, sort_descending, Group, Matrix};
use crate::dataset::{Attribute, FieldValue, TradeRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bar direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// Bars in drawing order
///
/// Horizontal charts list bars ascending so the largest is drawn on top;
/// vertical charts list them descending, largest on the left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub title: String,
    pub orientation: Orientation,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn from_groups(
        title: impl Into<String>,
        mut groups: Vec<Group>,
        orientation: Orientation,
        label_chars: Option<usize>,
    ) -> Self {
        match orientation {
            Orientation::Horizontal => sort_ascending(&mut groups),
            Orientation::Vertical => sort_descending(&mut groups),
        }

        let bars = groups
            .iter()
            .map(|g| Bar {
                label: display_label(&g.label(), label_chars),
                value: g.value,
            })
            .collect();

        Self {
            title: title.into(),
            orientation,
            bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// How a multi-series chart is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Line,
    GroupedBar,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearPoint {
    pub year: i32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub points: Vec<YearPoint>,
}

/// One series per category, with years on the x axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesChart {
    pub title: String,
    pub kind: SeriesKind,
    pub series: Vec<Series>,
}

impl SeriesChart {
    /// Build from groups keyed by `[year, category]`
    ///
    /// Groups with any other key shape are ignored.
    pub fn by_year(
        title: impl Into<String>,
        kind: SeriesKind,
        groups: &[Group],
        label_chars: Option<usize>,
    ) -> Self {
        let mut by_category: BTreeMap<&FieldValue, Vec<YearPoint>> = BTreeMap::new();

        for group in groups {
            if let [FieldValue::Year(year), category] = group.key.as_slice() {
                by_category.entry(category).or_default().push(YearPoint {
                    year: *year,
                    value: group.value,
                });
            }
        }

        let series = by_category
            .into_iter()
            .map(|(category, mut points)| {
                points.sort_by_key(|p| p.year);
                Series {
                    name: display_label(&category.to_string(), label_chars),
                    color: color_for(category).map(str::to_string),
                    points,
                }
            })
            .collect();

        Self {
            title: title.into(),
            kind,
            series,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    /// Percentage of the chart total
    pub share: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Pie or donut (`hole` > 0) chart, slices in the given order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChart {
    pub title: String,
    pub hole: f64,
    pub slices: Vec<Slice>,
}

impl PieChart {
    pub fn from_groups(title: impl Into<String>, groups: &[Group], hole: f64) -> Self {
        let total: f64 = groups.iter().map(|g| g.value).sum();

        let slices = groups
            .iter()
            .map(|g| Slice {
                label: g.label(),
                value: g.value,
                share: if total > 0.0 { g.value / total * 100.0 } else { 0.0 },
                color: g
                    .key
                    .first()
                    .and_then(color_for)
                    .map(str::to_string),
            })
            .collect();

        Self {
            title: title.into(),
            hole,
            slices,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub weight_kg: f64,
    pub value: f64,
    /// Colour category
    pub group: String,
    /// Hover text
    pub label: String,
}

/// Value against weight, for log-log axes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterChart {
    pub title: String,
    pub points: Vec<ScatterPoint>,
}

impl ScatterChart {
    /// Points for every record with strictly positive value and weight
    ///
    /// Zero values cannot be placed on a logarithmic axis and are dropped.
    pub fn from_records(
        title: impl Into<String>,
        records: &[&TradeRecord],
        color_by: Attribute,
        hover: Attribute,
    ) -> Self {
        let points = records
            .iter()
            .filter(|r| r.fob_value > 0.0 && r.net_weight_kg > 0.0)
            .map(|r| ScatterPoint {
                weight_kg: r.net_weight_kg,
                value: r.fob_value,
                group: r.field(color_by).to_string(),
                label: r.field(hover).to_string(),
            })
            .collect();

        Self {
            title: title.into(),
            points,
        }
    }
}

/// Matrix with display labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapChart {
    pub title: String,
    pub row_axis: String,
    pub column_axis: String,
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl HeatmapChart {
    pub fn from_matrix(
        title: impl Into<String>,
        matrix: Matrix,
        row_axis: Attribute,
        column_axis: Attribute,
    ) -> Self {
        Self {
            title: title.into(),
            row_axis: row_axis.to_string(),
            column_axis: column_axis.to_string(),
            rows: matrix.rows.iter().map(|v| v.to_string()).collect(),
            columns: matrix.columns.iter().map(|v| v.to_string()).collect(),
            values: matrix.values,
        }
    }
}

fn display_label(label: &str, label_chars: Option<usize>) -> String {
    match label_chars {
        Some(budget) => truncate_label(label, budget),
        None => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::group_by;
    use crate::aggregator::Reduction;
    use crate::dataset::{Flow, Measure};

    #[test]
    fn test_horizontal_bars_ascending() {
        let groups = vec![
            Group::labelled("A", 50.0),
            Group::labelled("B", 10.0),
            Group::labelled("C", 30.0),
        ];
        let chart = BarChart::from_groups("t", groups, Orientation::Horizontal, None);
        let labels: Vec<&str> = chart.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_vertical_bars_descending_with_truncation() {
        let groups = vec![
            Group::labelled("Short", 1.0),
            Group::labelled("A very long product description", 2.0),
        ];
        let chart = BarChart::from_groups("t", groups, Orientation::Vertical, Some(6));
        assert_eq!(chart.bars[0].label, "A very...");
        assert_eq!(chart.bars[1].label, "Short");
    }

    #[test]
    fn test_series_by_year_with_flow_colors() {
        let data = vec![
            TradeRecord::new(2021, Flow::Import, 40.0, 1.0),
            TradeRecord::new(2020, Flow::Export, 10.0, 1.0),
            TradeRecord::new(2021, Flow::Export, 20.0, 1.0),
        ];
        let view: Vec<&TradeRecord> = data.iter().collect();
        let groups = group_by(
            &view,
            &[Attribute::Year, Attribute::Flow],
            Measure::FobValue,
            Reduction::Sum,
        );

        let chart = SeriesChart::by_year("t", SeriesKind::Line, &groups, None);

        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].name, "Exportação");
        assert_eq!(chart.series[0].color.as_deref(), Some("#2E86C1"));
        assert_eq!(
            chart.series[0].points,
            vec![
                YearPoint { year: 2020, value: 10.0 },
                YearPoint { year: 2021, value: 20.0 }
            ]
        );
        assert_eq!(chart.series[1].color.as_deref(), Some("#E74C3C"));
    }

    #[test]
    fn test_pie_shares() {
        let groups = vec![Group::labelled("A", 75.0), Group::labelled("B", 25.0)];
        let pie = PieChart::from_groups("t", &groups, 0.4);
        assert_eq!(pie.slices[0].share, 75.0);
        assert_eq!(pie.slices[1].share, 25.0);

        let empty = PieChart::from_groups("t", &[Group::labelled("A", 0.0)], 0.0);
        assert_eq!(empty.slices[0].share, 0.0);
    }

    #[test]
    fn test_scatter_drops_non_positive() {
        let data = vec![
            TradeRecord::new(2021, Flow::Export, 100.0, 10.0).with_product("Vegetal", "Soja"),
            TradeRecord::new(2021, Flow::Import, 40.0, 0.0).with_product("Vegetal", "Milho"),
            TradeRecord::new(2021, Flow::Import, 0.0, 3.0).with_product("Vegetal", "Arroz"),
        ];
        let view: Vec<&TradeRecord> = data.iter().collect();

        let chart = ScatterChart::from_records("t", &view, Attribute::Section, Attribute::Product);
        assert_eq!(chart.points.len(), 1);
        assert_eq!(chart.points[0].label, "Soja");
        assert_eq!(chart.points[0].group, "Vegetal");
    }
}
