//! Attribute selections and the predicate combinator that applies them.
//!
//! A `Selection` maps each attribute to the set of values a record may
//! carry. Attributes combine with AND, values of one attribute with OR, and
//! an attribute with no allowed values does not restrict anything.

use crate::dataset::{Attribute, FieldValue, Flow, TradeRecord};
use crate::utils::config::ALL_SENTINELS;
use crate::utils::error::FilterError;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Allowed values per attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    allowed: BTreeMap<Attribute, BTreeSet<FieldValue>>,
}

impl Selection {
    /// A selection that lets every record through
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict `attribute` to `values`; an empty set clears the restriction
    pub fn with<I>(mut self, attribute: Attribute, values: I) -> Self
    where
        I: IntoIterator<Item = FieldValue>,
    {
        let values: BTreeSet<FieldValue> = values.into_iter().collect();
        if values.is_empty() {
            self.allowed.remove(&attribute);
        } else {
            self.allowed.insert(attribute, values);
        }
        self
    }

    pub fn with_years(self, years: impl IntoIterator<Item = i32>) -> Self {
        self.with(Attribute::Year, years.into_iter().map(FieldValue::Year))
    }

    pub fn with_flows(self, flows: impl IntoIterator<Item = Flow>) -> Self {
        self.with(Attribute::Flow, flows.into_iter().map(FieldValue::Flow))
    }

    pub fn with_text<S: Into<String>>(
        self,
        attribute: Attribute,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        self.with(attribute, values.into_iter().map(FieldValue::text))
    }

    /// Restrict `attribute` from textual choices as a user would pick them
    ///
    /// A choice naming "all" (`Todos`, `Todas`, `All`) leaves the attribute
    /// unrestricted, as does an empty list.
    ///
    /// # Errors
    /// * `FilterError::InvalidValue` - A choice does not parse for the attribute
    pub fn with_choices<S: AsRef<str>>(
        self,
        attribute: Attribute,
        choices: &[S],
    ) -> Result<Self, FilterError> {
        if choices.iter().any(|c| is_all_sentinel(c.as_ref())) {
            debug!("'All' chosen for {}, not filtering", attribute);
            return Ok(self.with(attribute, std::iter::empty()));
        }

        let values = choices
            .iter()
            .map(|c| attribute.parse_value(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.with(attribute, values))
    }

    /// Allowed values for an attribute, `None` when unrestricted
    pub fn allowed(&self, attribute: Attribute) -> Option<&BTreeSet<FieldValue>> {
        self.allowed.get(&attribute)
    }

    pub fn is_active(&self, attribute: Attribute) -> bool {
        self.allowed.contains_key(&attribute)
    }

    /// True when no attribute is restricted
    pub fn is_unrestricted(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Whether a record passes every active restriction
    pub fn matches(&self, record: &TradeRecord) -> bool {
        self.allowed
            .iter()
            .all(|(attribute, values)| values.contains(&record.field(*attribute)))
    }

    /// Records passing the selection, in input order
    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a TradeRecord>
    where
        I: IntoIterator<Item = &'a TradeRecord>,
    {
        let view: Vec<&TradeRecord> = records.into_iter().filter(|r| self.matches(r)).collect();
        debug!(
            "Selection on {} attribute(s) kept {} records",
            self.allowed.len(),
            view.len()
        );
        view
    }

    /// Active restrictions as display strings, keyed by attribute name
    pub fn describe(&self) -> BTreeMap<String, Vec<String>> {
        self.allowed
            .iter()
            .map(|(attribute, values)| {
                (
                    attribute.to_string(),
                    values.iter().map(|v| v.to_string()).collect(),
                )
            })
            .collect()
    }
}

pub fn is_all_sentinel(choice: &str) -> bool {
    let choice = choice.trim().to_lowercase();
    ALL_SENTINELS.contains(&choice.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<TradeRecord> {
        vec![
            TradeRecord::new(2020, Flow::Export, 100.0, 10.0).with_place("Teresina", "China"),
            TradeRecord::new(2021, Flow::Export, 50.0, 5.0).with_place("Parnaíba", "Chile"),
            TradeRecord::new(2021, Flow::Import, 40.0, 0.0).with_place("Teresina", "Chile"),
            TradeRecord::new(2022, Flow::Import, 10.0, 1.0).with_place("Picos", "China"),
        ]
    }

    #[test]
    fn test_empty_selection_passes_everything() {
        let data = records();
        let view = Selection::new().apply(&data);
        assert_eq!(view.len(), data.len());
    }

    #[test]
    fn test_and_across_or_within() {
        let data = records();
        let selection = Selection::new()
            .with_years([2021, 2022])
            .with_text(Attribute::Country, ["Chile"]);

        let view = selection.apply(&data);

        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|r| r.country == "Chile"));
        assert!(view.iter().all(|r| r.year == 2021));
    }

    #[test]
    fn test_empty_values_clear_restriction() {
        let selection = Selection::new()
            .with_years([2020])
            .with_years(std::iter::empty());
        assert!(!selection.is_active(Attribute::Year));
        assert!(selection.is_unrestricted());
    }

    #[test]
    fn test_all_sentinel_is_pass_through() {
        let data = records();
        let selection = Selection::new()
            .with_choices(Attribute::Municipality, &["Teresina", "Todos"])
            .unwrap();

        assert!(!selection.is_active(Attribute::Municipality));
        assert_eq!(selection.apply(&data).len(), 4);
    }

    #[test]
    fn test_choices_parse_typed_values() {
        let data = records();
        let selection = Selection::new()
            .with_choices(Attribute::Flow, &["Importação"])
            .unwrap()
            .with_choices(Attribute::Year, &["2022"])
            .unwrap();

        let view = selection.apply(&data);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].municipality, "Picos");
    }

    #[test]
    fn test_invalid_choice() {
        let err = Selection::new()
            .with_choices(Attribute::Year, &["next year"])
            .unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidValue {
                attribute: "year".to_string(),
                value: "next year".to_string()
            }
        );
    }

    #[test]
    fn test_no_match_is_empty_view() {
        let data = records();
        let view = Selection::new().with_years([1999]).apply(&data);
        assert!(view.is_empty());
    }

    #[test]
    fn test_describe() {
        let selection = Selection::new()
            .with_flows([Flow::Export])
            .with_years([2021, 2020]);
        let described = selection.describe();

        assert_eq!(described["year"], vec!["2020", "2021"]);
        assert_eq!(described["flow"], vec!["Exportação"]);
    }
}
