//! Trade record schema and the attributes it can be filtered or grouped by.

use crate::utils::error::FilterError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Flow {
    #[serde(rename = "Exportação", alias = "export")]
    Export,
    #[serde(rename = "Importação", alias = "import")]
    Import,
}

impl Flow {
    /// Label used by the source data and by chart legends
    pub fn label(&self) -> &'static str {
        match self {
            Flow::Export => "Exportação",
            Flow::Import => "Importação",
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Flow {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exportação" | "exportacao" | "export" | "exports" | "exp" => Ok(Flow::Export),
            "importação" | "importacao" | "import" | "imports" | "imp" => Ok(Flow::Import),
            _ => Err(FilterError::InvalidValue {
                attribute: Attribute::Flow.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// A categorical attribute of a trade record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Year,
    Flow,
    Municipality,
    Country,
    Section,
    Product,
}

impl Attribute {
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Year => "year",
            Attribute::Flow => "flow",
            Attribute::Municipality => "municipality",
            Attribute::Country => "country",
            Attribute::Section => "section",
            Attribute::Product => "product",
        }
    }

    /// Parse a textual choice into a value of this attribute
    pub fn parse_value(&self, raw: &str) -> Result<FieldValue, FilterError> {
        match self {
            Attribute::Year => raw
                .trim()
                .parse::<i32>()
                .map(FieldValue::Year)
                .map_err(|_| FilterError::InvalidValue {
                    attribute: self.to_string(),
                    value: raw.to_string(),
                }),
            Attribute::Flow => raw.parse::<Flow>().map(FieldValue::Flow),
            _ => Ok(FieldValue::Text(raw.trim().to_string())),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The value of one attribute on one record
///
/// Ordering follows the natural order of each kind (years numerically,
/// flows export before import, text lexicographically).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Year(i32),
    Flow(Flow),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Year(year) => write!(f, "{}", year),
            FieldValue::Flow(flow) => write!(f, "{}", flow),
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

/// Numeric column reduced by aggregations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    FobValue,
    NetWeight,
    ValuePerKg,
}

/// One row of the foreign-trade dataset
///
/// Serialized with the source spreadsheet's column names so exported rows
/// can be loaded again.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    #[serde(rename = "Ano")]
    pub year: i32,

    #[serde(rename = "Fluxo")]
    pub flow: Flow,

    #[serde(rename = "Município")]
    pub municipality: String,

    #[serde(rename = "País")]
    pub country: String,

    #[serde(rename = "Descrição Seção")]
    pub section: String,

    #[serde(rename = "Descrição SH4")]
    pub product: String,

    /// FOB value in US dollars
    #[serde(rename = "Valor US$ FOB")]
    pub fob_value: f64,

    #[serde(rename = "Quilograma Líquido")]
    pub net_weight_kg: f64,

    /// Derived on construction, `None` when the weight is zero
    #[serde(rename = "Valor por kg")]
    value_per_kg: Option<f64>,
}

impl TradeRecord {
    /// Create a record and derive its value per kilogram
    pub fn new(year: i32, flow: Flow, fob_value: f64, net_weight_kg: f64) -> Self {
        Self {
            year,
            flow,
            municipality: String::new(),
            country: String::new(),
            section: String::new(),
            product: String::new(),
            fob_value,
            net_weight_kg,
            value_per_kg: derive_value_per_kg(fob_value, net_weight_kg),
        }
    }

    pub fn with_place(mut self, municipality: impl Into<String>, country: impl Into<String>) -> Self {
        self.municipality = municipality.into();
        self.country = country.into();
        self
    }

    pub fn with_product(mut self, section: impl Into<String>, product: impl Into<String>) -> Self {
        self.section = section.into();
        self.product = product.into();
        self
    }

    /// FOB value divided by net weight, undefined for zero weight
    pub fn value_per_kg(&self) -> Option<f64> {
        self.value_per_kg
    }

    /// Value of a categorical attribute
    pub fn field(&self, attribute: Attribute) -> FieldValue {
        match attribute {
            Attribute::Year => FieldValue::Year(self.year),
            Attribute::Flow => FieldValue::Flow(self.flow),
            Attribute::Municipality => FieldValue::Text(self.municipality.clone()),
            Attribute::Country => FieldValue::Text(self.country.clone()),
            Attribute::Section => FieldValue::Text(self.section.clone()),
            Attribute::Product => FieldValue::Text(self.product.clone()),
        }
    }

    /// Value of a numeric column, `None` when undefined
    pub fn measure(&self, measure: Measure) -> Option<f64> {
        match measure {
            Measure::FobValue => Some(self.fob_value),
            Measure::NetWeight => Some(self.net_weight_kg),
            Measure::ValuePerKg => self.value_per_kg,
        }
    }
}

fn derive_value_per_kg(fob_value: f64, net_weight_kg: f64) -> Option<f64> {
    if net_weight_kg > 0.0 {
        let ratio = fob_value / net_weight_kg;
        ratio.is_finite().then_some(ratio)
    } else {
        None
    }
}
