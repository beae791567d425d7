//! Dense two-dimensional aggregation for heatmap views.

use crate::dataset::{Attribute, FieldValue, Measure, TradeRecord};
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Sums of a measure for every (row, column) combination
///
/// Rows and columns are in ascending key order; missing combinations are 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    pub rows: Vec<FieldValue>,
    pub columns: Vec<FieldValue>,
    pub values: Vec<Vec<f64>>,
}

impl Matrix {
    /// Pivot `records` into a zero-filled matrix of summed `measure`
    pub fn build(
        records: &[&TradeRecord],
        row_attribute: Attribute,
        column_attribute: Attribute,
        measure: Measure,
    ) -> Self {
        let mut cells: BTreeMap<(FieldValue, FieldValue), f64> = BTreeMap::new();
        let mut rows = BTreeSet::new();
        let mut columns = BTreeSet::new();

        for record in records {
            let row = record.field(row_attribute);
            let column = record.field(column_attribute);
            rows.insert(row.clone());
            columns.insert(column.clone());

            if let Some(value) = record.measure(measure) {
                *cells.entry((row, column)).or_insert(0.0) += value;
            }
        }

        let rows: Vec<FieldValue> = rows.into_iter().collect();
        let columns: Vec<FieldValue> = columns.into_iter().collect();

        let values = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| {
                        cells
                            .get(&(row.clone(), column.clone()))
                            .copied()
                            .unwrap_or(0.0)
                    })
                    .collect()
            })
            .collect();

        debug!("Built {}x{} matrix", rows.len(), columns.len());

        Self {
            rows,
            columns,
            values,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    pub fn get(&self, row: &FieldValue, column: &FieldValue) -> Option<f64> {
        let r = self.rows.iter().position(|v| v == row)?;
        let c = self.columns.iter().position(|v| v == column)?;
        Some(self.values[r][c])
    }

    pub fn row_totals(&self) -> Vec<f64> {
        self.values.iter().map(|row| row.iter().sum()).collect()
    }

    pub fn column_totals(&self) -> Vec<f64> {
        (0..self.columns.len())
            .map(|c| self.values.iter().map(|row| row[c]).sum())
            .collect()
    }

    pub fn total(&self) -> f64 {
        self.row_totals().iter().sum()
    }

    /// Keep the `k` rows and `k` columns with the largest marginal totals
    ///
    /// Marginals are computed on the full matrix, independently per axis.
    /// Surviving rows and columns keep their original order.
    pub fn restrict_to_top(&self, k: usize) -> Matrix {
        let keep_rows = top_indices(&self.row_totals(), &self.rows, k);
        let keep_columns = top_indices(&self.column_totals(), &self.columns, k);

        Matrix {
            rows: keep_rows.iter().map(|&r| self.rows[r].clone()).collect(),
            columns: keep_columns.iter().map(|&c| self.columns[c].clone()).collect(),
            values: keep_rows
                .iter()
                .map(|&r| keep_columns.iter().map(|&c| self.values[r][c]).collect())
                .collect(),
        }
    }
}

/// Indices of the `k` largest totals, returned in ascending index order
fn top_indices(totals: &[f64], keys: &[FieldValue], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..totals.len()).collect();
    order.sort_by(|&a, &b| {
        totals[b]
            .total_cmp(&totals[a])
            .then_with(|| keys[a].cmp(&keys[b]))
    });
    order.truncate(k);
    order.sort_unstable();
    order
}

/// Matrix for a heatmap, restricted when either axis is too wide to show
///
/// **Public** - main entry point for heatmap views
pub fn heatmap(
    records: &[&TradeRecord],
    row_attribute: Attribute,
    column_attribute: Attribute,
    measure: Measure,
    threshold: usize,
    top_k: usize,
) -> Matrix {
    let matrix = Matrix::build(records, row_attribute, column_attribute, measure);

    if matrix.rows.len() > threshold || matrix.columns.len() > threshold {
        debug!(
            "Matrix {}x{} exceeds {}, keeping top {}",
            matrix.rows.len(),
            matrix.columns.len(),
            threshold,
            top_k
        );
        matrix.restrict_to_top(top_k)
    } else {
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Flow;

    fn record(municipality: &str, country: &str, value: f64) -> TradeRecord {
        TradeRecord::new(2021, Flow::Export, value, 1.0).with_place(municipality, country)
    }

    #[test]
    fn test_zero_fill() {
        let data = vec![record("A", "X", 10.0), record("B", "Y", 5.0), record("A", "X", 1.0)];
        let view: Vec<&TradeRecord> = data.iter().collect();

        let m = Matrix::build(&view, Attribute::Municipality, Attribute::Country, Measure::FobValue);

        assert_eq!(m.rows, vec![FieldValue::text("A"), FieldValue::text("B")]);
        assert_eq!(m.values, vec![vec![11.0, 0.0], vec![0.0, 5.0]]);
        assert_eq!(m.get(&FieldValue::text("B"), &FieldValue::text("X")), Some(0.0));
        assert_eq!(m.total(), 16.0);
    }

    #[test]
    fn test_restrict_to_top_uses_marginals() {
        let data = vec![
            record("A", "X", 1.0),
            record("B", "X", 10.0),
            record("C", "Y", 20.0),
            record("A", "Z", 2.0),
        ];
        let view: Vec<&TradeRecord> = data.iter().collect();

        let m = Matrix::build(&view, Attribute::Municipality, Attribute::Country, Measure::FobValue)
            .restrict_to_top(2);

        assert_eq!(m.rows, vec![FieldValue::text("B"), FieldValue::text("C")]);
        assert_eq!(m.columns, vec![FieldValue::text("X"), FieldValue::text("Y")]);
        assert_eq!(m.values, vec![vec![10.0, 0.0], vec![0.0, 20.0]]);
    }

    #[test]
    fn test_heatmap_threshold() {
        let data: Vec<TradeRecord> = (0..25)
            .map(|i| record(&format!("M{:02}", i), "X", i as f64))
            .collect();
        let view: Vec<&TradeRecord> = data.iter().collect();

        let wide = heatmap(&view, Attribute::Municipality, Attribute::Country, Measure::FobValue, 20, 10);
        assert_eq!(wide.rows.len(), 10);
        assert_eq!(wide.rows[0], FieldValue::text("M15"));

        let narrow = heatmap(&view[..5], Attribute::Municipality, Attribute::Country, Measure::FobValue, 20, 10);
        assert_eq!(narrow.rows.len(), 5);
    }

    #[test]
    fn test_heatmap_below_threshold_is_kept_whole() {
        let data: Vec<TradeRecord> = (0..15)
            .flat_map(|m| {
                (0..12).map(move |c| record(&format!("M{:02}", m), &format!("C{:02}", c), 1.0))
            })
            .collect();
        let view: Vec<&TradeRecord> = data.iter().collect();

        let m = heatmap(&view, Attribute::Municipality, Attribute::Country, Measure::FobValue, 20, 10);

        assert_eq!(m.rows.len(), 15);
        assert_eq!(m.columns.len(), 12);
    }
}
