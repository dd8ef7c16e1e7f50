use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use catalog_model::{Attribute, ScholarshipRecord};

use crate::error::Result;

/// Filter criteria: attribute name → set of accepted values.
///
/// Ordered maps so the criteria themselves have a stable shape; the result
/// set is the same regardless of key order (AND is commutative).
pub type Criteria = BTreeMap<String, BTreeSet<String>>;

/// Multi-criteria exact-match filter.
///
/// A record survives iff, for every attribute present in `criteria` with a
/// non-empty accepted set, the record's value is a member of that set: AND
/// across attributes, OR within a set. An empty set (or an absent key) puts
/// no constraint on its attribute. Every named attribute is validated before
/// any matching happens, so a typo fails the whole call instead of silently
/// filtering everything out.
pub fn filter(records: &[ScholarshipRecord], criteria: &Criteria) -> Result<Vec<ScholarshipRecord>> {
    let mut resolved: Vec<(Attribute, &BTreeSet<String>)> = Vec::with_capacity(criteria.len());
    for (name, accepted) in criteria {
        let attr = Attribute::from_str(name)?;
        if !accepted.is_empty() {
            resolved.push((attr, accepted));
        }
    }

    let hits: Vec<ScholarshipRecord> = records
        .iter()
        .filter(|record| {
            resolved.iter().all(|(attr, accepted)| {
                record
                    .attribute_text(*attr)
                    .is_some_and(|value| accepted.contains(&value))
            })
        })
        .cloned()
        .collect();
    log::debug!(
        "filter with {} constrained attributes: {} of {} records",
        resolved.len(),
        hits.len(),
        records.len()
    );
    Ok(hits)
}
