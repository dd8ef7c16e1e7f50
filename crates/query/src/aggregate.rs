use std::collections::HashMap;
use std::str::FromStr;

use catalog_model::{Attribute, ScholarshipRecord};
use serde::Serialize;

use crate::error::Result;

/// One group from a count aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub value: String,
    pub count: usize,
}

/// One group from a proportion aggregation: count plus percentage share of
/// the total record count, one decimal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupShare {
    pub value: String,
    pub count: usize,
    pub percent: f64,
}

/// Group records by `attribute` and return the `n` largest groups as
/// (value, count), count descending.
///
/// Ties keep first-encountered group order (the scan is the only order the
/// source data has). `n` of `None` returns every group. Records with the
/// attribute unset fall into no group.
pub fn top_n(
    records: &[ScholarshipRecord],
    attribute: &str,
    n: Option<usize>,
) -> Result<Vec<GroupCount>> {
    let mut groups = count_groups(records, attribute)?;
    if let Some(n) = n {
        groups.truncate(n);
    }
    Ok(groups)
}

/// Same grouping as [`top_n`], plus each group's share of the total record
/// count as a percentage rounded half-away-from-zero to one decimal.
pub fn proportion_summary(
    records: &[ScholarshipRecord],
    attribute: &str,
) -> Result<Vec<GroupShare>> {
    let groups = count_groups(records, attribute)?;
    let total = records.len();
    Ok(groups
        .into_iter()
        .map(|group| {
            let percent = if total == 0 {
                0.0
            } else {
                round_one_decimal(group.count as f64 * 100.0 / total as f64)
            };
            GroupShare {
                value: group.value,
                count: group.count,
                percent,
            }
        })
        .collect())
}

/// Count group sizes in first-encountered order, then stable-sort by count
/// descending so equal counts keep that order.
fn count_groups(records: &[ScholarshipRecord], attribute: &str) -> Result<Vec<GroupCount>> {
    let attr = Attribute::from_str(attribute)?;

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        let Some(value) = record.attribute_text(attr) else {
            continue;
        };
        if !counts.contains_key(&value) {
            order.push(value.clone());
        }
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut groups: Vec<GroupCount> = order
        .into_iter()
        .map(|value| {
            let count = counts[&value];
            GroupCount { value, count }
        })
        .collect();
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    log::debug!("grouped by {}: {} groups", attr, groups.len());
    Ok(groups)
}

fn round_one_decimal(x: f64) -> f64 {
    // Half-away-from-zero, which `f64::round` already is.
    (x * 10.0).round() / 10.0
}
