use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;

/// One scholarship catalog entry, keyed by `id`.
///
/// `id` is caller-supplied and immutable once created; everything else is
/// mutable through [`RecordFields`]. `top_university` and `created_at` are
/// the only optional columns (early revisions of the catalog predate both).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScholarshipRecord {
    pub id: String,
    pub continent: String,
    pub origin_country: String,
    pub institution_name: String,
    pub top_university: Option<String>,
    pub program_level: String,
    pub scholarship_type: String,
    pub requirements: String,
    pub benefit: String,
    pub application_window: String,
    pub link: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl ScholarshipRecord {
    /// The record's value for `attr`, coerced to text.
    ///
    /// `None` for optional columns that are unset; search and grouping treat
    /// those as absent rather than empty strings.
    pub fn attribute_text(&self, attr: Attribute) -> Option<String> {
        match attr {
            Attribute::Id => Some(self.id.clone()),
            Attribute::Continent => Some(self.continent.clone()),
            Attribute::OriginCountry => Some(self.origin_country.clone()),
            Attribute::InstitutionName => Some(self.institution_name.clone()),
            Attribute::TopUniversity => self.top_university.clone(),
            Attribute::ProgramLevel => Some(self.program_level.clone()),
            Attribute::ScholarshipType => Some(self.scholarship_type.clone()),
            Attribute::Requirements => Some(self.requirements.clone()),
            Attribute::Benefit => Some(self.benefit.clone()),
            Attribute::ApplicationWindow => Some(self.application_window.clone()),
            Attribute::Link => Some(self.link.clone()),
            Attribute::CreatedAt => self.created_at.map(|ts| ts.to_rfc3339()),
        }
    }

    /// Split into the immutable key and the mutable remainder.
    pub fn fields(&self) -> RecordFields {
        RecordFields {
            continent: self.continent.clone(),
            origin_country: self.origin_country.clone(),
            institution_name: self.institution_name.clone(),
            top_university: self.top_university.clone(),
            program_level: self.program_level.clone(),
            scholarship_type: self.scholarship_type.clone(),
            requirements: self.requirements.clone(),
            benefit: self.benefit.clone(),
            application_window: self.application_window.clone(),
            link: self.link.clone(),
            created_at: self.created_at,
        }
    }
}

/// The ordered tuple of all non-id attributes, as accepted by the store's
/// update-by-id operation. `id` deliberately has no slot here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordFields {
    pub continent: String,
    pub origin_country: String,
    pub institution_name: String,
    pub top_university: Option<String>,
    pub program_level: String,
    pub scholarship_type: String,
    pub requirements: String,
    pub benefit: String,
    pub application_window: String,
    pub link: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl RecordFields {
    /// Reattach a key, producing a full record.
    pub fn into_record(self, id: impl Into<String>) -> ScholarshipRecord {
        ScholarshipRecord {
            id: id.into(),
            continent: self.continent,
            origin_country: self.origin_country,
            institution_name: self.institution_name,
            top_university: self.top_university,
            program_level: self.program_level,
            scholarship_type: self.scholarship_type,
            requirements: self.requirements,
            benefit: self.benefit,
            application_window: self.application_window,
            link: self.link,
            created_at: self.created_at,
        }
    }
}
