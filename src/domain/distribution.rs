//! Size aggregation over records and hierarchies.

use std::collections::HashMap;

use crate::domain::{Hierarchy, TypedRecord};

/// The coarse categories used by [`distribution_by_category`], in reporting
/// order.
pub const CATEGORIES: [&str; 3] = ["node", "connection", "other"];

/// Sums record sizes into the `node`, `connection` and `other` categories.
///
/// The result always contains all three categories, in that order.
#[must_use]
pub fn distribution_by_category(records: &[TypedRecord]) -> Vec<(&'static str, u64)> {
    let mut totals = [0_u64; 3];
    for record in records {
        let slot = match record {
            TypedRecord::NodeCreation(_) => 0,
            TypedRecord::Connection(_) => 1,
            _ => 2,
        };
        totals[slot] += record.size();
    }
    CATEGORIES.into_iter().zip(totals).collect()
}

/// Sums the own size of every node under the root by node type, largest
/// first.
///
/// Types of equal size keep the order in which they were first seen. With
/// `top` set, only that many entries are returned.
#[must_use]
pub fn distribution_by_type(hierarchy: &Hierarchy, top: Option<usize>) -> Vec<(String, u64)> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(String, u64)> = Vec::new();

    for id in hierarchy.descendants(hierarchy.root()) {
        let node = &hierarchy[id];
        match positions.get(node.node_type()) {
            Some(&position) => totals[position].1 += node.size(),
            None => {
                positions.insert(node.node_type(), totals.len());
                totals.push((node.node_type().to_string(), node.size()));
            }
        }
    }

    totals.sort_by(|a, b| b.1.cmp(&a.1));
    if let Some(top) = top {
        totals.truncate(top);
    }
    totals
}

/// `part` as a percentage of `total`, rounded to three decimal places.
///
/// An empty total yields zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percent_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = part as f64 / total as f64 * 100.0;
    (percent * 1000.0).round() / 1000.0
}
