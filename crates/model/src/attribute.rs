use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A grouping/filter key named a column that does not exist on the schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown attribute: {0}")]
pub struct UnknownAttribute(pub String);

/// The closed set of record attributes addressable by name.
///
/// Query operations take attribute names as strings (they arrive from user
/// input); resolving them through `FromStr` is what turns a typo into an
/// `UnknownAttribute` instead of an empty result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Id,
    Continent,
    OriginCountry,
    InstitutionName,
    TopUniversity,
    ProgramLevel,
    ScholarshipType,
    Requirements,
    Benefit,
    ApplicationWindow,
    Link,
    CreatedAt,
}

impl Attribute {
    /// All attributes in store column order.
    pub const ALL: [Attribute; 12] = [
        Attribute::Id,
        Attribute::Continent,
        Attribute::OriginCountry,
        Attribute::InstitutionName,
        Attribute::TopUniversity,
        Attribute::ProgramLevel,
        Attribute::ScholarshipType,
        Attribute::Requirements,
        Attribute::Benefit,
        Attribute::ApplicationWindow,
        Attribute::Link,
        Attribute::CreatedAt,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Attribute::Id => "id",
            Attribute::Continent => "continent",
            Attribute::OriginCountry => "origin_country",
            Attribute::InstitutionName => "institution_name",
            Attribute::TopUniversity => "top_university",
            Attribute::ProgramLevel => "program_level",
            Attribute::ScholarshipType => "scholarship_type",
            Attribute::Requirements => "requirements",
            Attribute::Benefit => "benefit",
            Attribute::ApplicationWindow => "application_window",
            Attribute::Link => "link",
            Attribute::CreatedAt => "created_at",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::ALL
            .into_iter()
            .find(|attr| attr.as_str() == s)
            .ok_or_else(|| UnknownAttribute(s.to_string()))
    }
}
