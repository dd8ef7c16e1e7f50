use catalog_model::{Attribute, ScholarshipRecord};

/// Case-insensitive containment search across every attribute.
///
/// A record matches when at least one attribute, coerced to text, contains
/// `keyword` as a substring (OR across attributes). An empty keyword is a
/// pass-through: the whole scan comes back unchanged.
pub fn substring_search(records: &[ScholarshipRecord], keyword: &str) -> Vec<ScholarshipRecord> {
    if keyword.is_empty() {
        return records.to_vec();
    }
    let needle = keyword.to_lowercase();
    let hits: Vec<ScholarshipRecord> = records
        .iter()
        .filter(|record| {
            Attribute::ALL.into_iter().any(|attr| {
                record
                    .attribute_text(attr)
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            })
        })
        .cloned()
        .collect();
    log::debug!("substring search '{}': {} hits", keyword, hits.len());
    hits
}
