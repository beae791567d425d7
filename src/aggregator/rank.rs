//! Ranking of groups: descending sort, top-N and the overflow bucket.

use super::group::Group;
use log::debug;
use std::cmp::Ordering;

/// Descending by value, ties broken by ascending key
fn by_value_desc(a: &Group, b: &Group) -> Ordering {
    b.value.total_cmp(&a.value).then_with(|| a.key.cmp(&b.key))
}

/// Sort groups from largest to smallest value
pub fn sort_descending(groups: &mut [Group]) {
    groups.sort_by(by_value_desc);
}

/// Sort groups from smallest to largest value
pub fn sort_ascending(groups: &mut [Group]) {
    groups.sort_by(|a, b| by_value_desc(b, a));
}

/// The `n` largest groups, largest first
pub fn top_n(mut groups: Vec<Group>, n: usize) -> Vec<Group> {
    sort_descending(&mut groups);
    groups.truncate(n);
    groups
}

/// The `n` largest groups followed by one group holding the rest
///
/// **Public** - used by distribution charts
///
/// The overflow group's value is the sum of every excluded group, so the
/// result always adds up to the input total. No overflow group is added
/// when there are at most `n` groups.
///
/// # Example
/// ```ignore
/// // {A: 50, B: 30, C: 20} with n = 1
/// let ranked = top_n_with_other(groups, 1, "Other");
/// // [(A, 50), (Other, 50)]
/// ```
pub fn top_n_with_other(mut groups: Vec<Group>, n: usize, other_label: &str) -> Vec<Group> {
    sort_descending(&mut groups);

    if groups.len() <= n {
        return groups;
    }

    let rest = groups.split_off(n);
    let other_value: f64 = rest.iter().map(|g| g.value).sum();

    debug!(
        "Merged {} groups into '{}' ({:.2})",
        rest.len(),
        other_label,
        other_value
    );

    groups.push(Group::labelled(other_label, other_value));
    groups
}
