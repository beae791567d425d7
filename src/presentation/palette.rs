//! Fixed colours so each flow looks the same in every chart.

use crate::dataset::{FieldValue, Flow};
use crate::utils::config::{EXPORT_COLOR, IMPORT_COLOR};

pub fn flow_color(flow: Flow) -> &'static str {
    match flow {
        Flow::Export => EXPORT_COLOR,
        Flow::Import => IMPORT_COLOR,
    }
}

/// Colour for a group key part, if it has a fixed one
pub fn color_for(value: &FieldValue) -> Option<&'static str> {
    match value {
        FieldValue::Flow(flow) => Some(flow_color(*flow)),
        _ => None,
    }
}
