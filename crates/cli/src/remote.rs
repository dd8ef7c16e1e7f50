use anyhow::{Context, Result};
use serde::Deserialize;

use catalog_model::ScholarshipRecord;

/// Placeholder for fields the remote source does not carry.
const PLACEHOLDER: &str = "-";

/// One scholarship-like object from a remote JSON list. Every field is
/// optional; whatever is missing gets a placeholder on mapping.
#[derive(Debug, Deserialize)]
pub struct RemoteScholarship {
    pub continent: Option<String>,
    pub origin_country: Option<String>,
    pub institution_name: Option<String>,
    pub top_university: Option<String>,
    pub program_level: Option<String>,
    pub scholarship_type: Option<String>,
    pub requirements: Option<String>,
    pub benefit: Option<String>,
    pub application_window: Option<String>,
    pub link: Option<String>,
}

/// Fetch a JSON array of scholarship-like objects.
pub fn fetch(url: &str) -> Result<Vec<RemoteScholarship>> {
    log::info!("importing from {url}");
    let response = reqwest::blocking::get(url)
        .with_context(|| format!("fetching {url}"))?
        .error_for_status()
        .with_context(|| format!("fetching {url}"))?;
    let items: Vec<RemoteScholarship> = response
        .json()
        .with_context(|| format!("decoding JSON list from {url}"))?;
    log::info!("remote source returned {} items", items.len());
    Ok(items)
}

/// Map remote objects onto records, assigning sequential generated ids
/// starting at `next_serial` (the original catalog's `B`-prefixed shape).
pub fn into_records(items: Vec<RemoteScholarship>, next_serial: u32) -> Vec<ScholarshipRecord> {
    let fill = |value: Option<String>| value.unwrap_or_else(|| PLACEHOLDER.to_string());
    items
        .into_iter()
        .enumerate()
        .map(|(offset, item)| ScholarshipRecord {
            id: format!("B{:03}", next_serial + offset as u32),
            continent: fill(item.continent),
            origin_country: fill(item.origin_country),
            institution_name: fill(item.institution_name),
            top_university: item.top_university,
            program_level: fill(item.program_level),
            scholarship_type: fill(item.scholarship_type),
            requirements: fill(item.requirements),
            benefit: fill(item.benefit),
            application_window: fill(item.application_window),
            link: fill(item.link),
            created_at: None,
        })
        .collect()
}

/// The next free serial for a generated `B`-prefixed id, one past the
/// largest numeric suffix already stored.
pub fn next_serial(records: &[ScholarshipRecord]) -> u32 {
    records
        .iter()
        .filter_map(|record| record.id.strip_prefix('B')?.parse::<u32>().ok())
        .max()
        .map(|max| max + 1)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_get_placeholders_and_generated_ids() {
        let items: Vec<RemoteScholarship> = serde_json::from_str(
            r#"[
                {"institution_name": "DAAD", "continent": "Europe"},
                {"scholarship_type": "Partial"}
            ]"#,
        )
        .unwrap();

        let records = into_records(items, 4);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "B004");
        assert_eq!(records[0].institution_name, "DAAD");
        assert_eq!(records[0].scholarship_type, "-");
        assert_eq!(records[1].id, "B005");
        assert_eq!(records[1].top_university, None);
    }

    #[test]
    fn test_next_serial_skips_past_existing_ids() {
        let items: Vec<RemoteScholarship> = serde_json::from_str(r#"[{}]"#).unwrap();
        let existing = into_records(items, 7);
        assert_eq!(next_serial(&existing), 8);
        assert_eq!(next_serial(&[]), 1);
    }

    #[test]
    fn test_non_serial_ids_are_ignored_for_numbering() {
        let items: Vec<RemoteScholarship> = serde_json::from_str(r#"[{}, {}]"#).unwrap();
        let mut records = into_records(items, 1);
        records[1].id = "LPDP-2024".to_string();
        assert_eq!(next_serial(&records), 2);
    }
}
