use catalog_model::ScholarshipRecord;

/// Minimal record constructor shared by the engine tests; the fields most
/// tests do not care about get stable filler values.
pub fn record(id: &str, continent: &str, scholarship_type: &str) -> ScholarshipRecord {
    ScholarshipRecord {
        id: id.to_string(),
        continent: continent.to_string(),
        origin_country: "Japan".to_string(),
        institution_name: "MEXT".to_string(),
        top_university: None,
        program_level: "S2".to_string(),
        scholarship_type: scholarship_type.to_string(),
        requirements: "Bachelor degree".to_string(),
        benefit: "Tuition + stipend".to_string(),
        application_window: "April - May".to_string(),
        link: "https://example.org/mext".to_string(),
        created_at: None,
    }
}
