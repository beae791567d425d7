//! Label shaping for chart axes and legends.

use crate::utils::config::ELLIPSIS;

/// Shorten `label` to `budget` characters, marking the cut with an ellipsis
///
/// Counts characters rather than bytes, so accented names are never split.
/// Labels within the budget are returned unchanged.
pub fn truncate_label(label: &str, budget: usize) -> String {
    let label = label.trim();

    match label.char_indices().nth(budget) {
        Some((cut, _)) => format!("{}{}", label[..cut].trim_end(), ELLIPSIS),
        None => label.to_string(),
    }
}
