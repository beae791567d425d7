//! Group-by reduction over a view of trade records.
//!
//! Records are bucketed by the values of one or more attributes and a
//! numeric measure is reduced per bucket. Groups come out in ascending key
//! order; ranking is left to `rank`.

use crate::dataset::{Attribute, FieldValue, Measure, TradeRecord};
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// How a measure is reduced within a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// Sum of defined values
    Sum,
    /// Mean of defined values
    Mean,
    /// Number of records with a defined value
    Count,
    /// Number of distinct values of an attribute
    DistinctCount(Attribute),
}

/// One group key with its reduced value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub key: Vec<FieldValue>,
    pub value: f64,
}

impl Group {
    pub fn new(key: Vec<FieldValue>, value: f64) -> Self {
        Self { key, value }
    }

    /// Group keyed by a single label
    pub fn labelled(label: impl Into<String>, value: f64) -> Self {
        Self::new(vec![FieldValue::text(label)], value)
    }

    /// Key parts joined for display
    pub fn label(&self) -> String {
        self.key
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    defined: usize,
    distinct: BTreeSet<FieldValue>,
}

impl Accumulator {
    fn reduce(&self, reduction: Reduction) -> Option<f64> {
        match reduction {
            Reduction::Sum => (self.defined > 0).then_some(self.sum),
            Reduction::Mean => (self.defined > 0)
                .then(|| self.sum / self.defined as f64)
                .filter(|mean| mean.is_finite()),
            Reduction::Count => Some(self.defined as f64),
            Reduction::DistinctCount(_) => Some(self.distinct.len() as f64),
        }
    }
}

/// Group `records` by `by` and reduce `measure` per group
///
/// **Public** - main entry point for aggregation
///
/// Undefined measure values (value per kg of zero-weight records) are
/// skipped. Sum and mean omit groups with no defined value at all.
pub fn group_by(
    records: &[&TradeRecord],
    by: &[Attribute],
    measure: Measure,
    reduction: Reduction,
) -> Vec<Group> {
    let mut buckets: BTreeMap<Vec<FieldValue>, Accumulator> = BTreeMap::new();

    for record in records {
        let key: Vec<FieldValue> = by.iter().map(|a| record.field(*a)).collect();
        let acc = buckets.entry(key).or_default();

        if let Some(value) = record.measure(measure) {
            acc.sum += value;
            acc.defined += 1;
        }
        if let Reduction::DistinctCount(attribute) = reduction {
            acc.distinct.insert(record.field(attribute));
        }
    }

    let groups: Vec<Group> = buckets
        .into_iter()
        .filter_map(|(key, acc)| acc.reduce(reduction).map(|value| Group::new(key, value)))
        .collect();

    debug!(
        "Grouped {} records by {:?} into {} groups",
        records.len(),
        by,
        groups.len()
    );

    groups
}

/// Sum of `measure` per value of a single attribute
pub fn sum_by(records: &[&TradeRecord], attribute: Attribute, measure: Measure) -> Vec<Group> {
    group_by(records, &[attribute], measure, Reduction::Sum)
}

/// Sum of the defined values of `measure` over all records
pub fn total(records: &[&TradeRecord], measure: Measure) -> f64 {
    records.iter().filter_map(|r| r.measure(measure)).sum()
}

/// Number of distinct values of `attribute`
pub fn distinct_count(records: &[&TradeRecord], attribute: Attribute) -> usize {
    records
        .iter()
        .map(|r| r.field(attribute))
        .collect::<BTreeSet<_>>()
        .len()
}
