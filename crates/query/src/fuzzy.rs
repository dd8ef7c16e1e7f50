use std::str::FromStr;

use catalog_model::{Attribute, ScholarshipRecord};

use crate::error::Result;

/// Default single-field target for fuzzy search.
pub const DEFAULT_FIELD: Attribute = Attribute::InstitutionName;

/// Default keep threshold; scores must be strictly greater to survive.
pub const DEFAULT_THRESHOLD: f64 = 70.0;

/// A pluggable string-similarity metric scoring in [0, 100].
///
/// Implementations must score identical inputs at 100, be symmetric after
/// trim/case normalization, and decrease as edit distance grows. Any metric
/// with those properties is interchangeable here.
pub trait Similarity {
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Jaro–Winkler similarity over trimmed, lowercased input.
#[derive(Debug, Default, Clone, Copy)]
pub struct JaroWinkler;

impl Similarity for JaroWinkler {
    fn score(&self, a: &str, b: &str) -> f64 {
        let a = normalize(a);
        let b = normalize(b);
        strsim::jaro_winkler(&a, &b) * 100.0
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Single-field approximate match, distinct from [`crate::substring_search`]:
/// that one tests exact containment across all attributes, this one scores
/// one attribute against the keyword and keeps the near-misses too.
pub struct FuzzySearch<S: Similarity = JaroWinkler> {
    metric: S,
}

impl FuzzySearch {
    pub fn new() -> Self {
        Self { metric: JaroWinkler }
    }
}

impl Default for FuzzySearch {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Similarity> FuzzySearch<S> {
    pub fn with_metric(metric: S) -> Self {
        Self { metric }
    }

    /// Score `field` of every record against `keyword`; keep records whose
    /// score is strictly greater than `threshold`, best score first.
    ///
    /// `field` of `None` targets the institution name, `threshold` of `None`
    /// keeps scores above 70. Records whose field is unset never match.
    pub fn search(
        &self,
        records: &[ScholarshipRecord],
        keyword: &str,
        field: Option<&str>,
        threshold: Option<f64>,
    ) -> Result<Vec<(ScholarshipRecord, f64)>> {
        let field = match field {
            Some(name) => Attribute::from_str(name)?,
            None => DEFAULT_FIELD,
        };
        let threshold = threshold.unwrap_or(DEFAULT_THRESHOLD);

        let mut scored: Vec<(ScholarshipRecord, f64)> = records
            .iter()
            .filter_map(|record| {
                let value = record.attribute_text(field)?;
                let score = self.metric.score(keyword, &value);
                (score > threshold).then(|| (record.clone(), score))
            })
            .collect();

        // Stable sort: equal scores keep scan order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        log::debug!(
            "fuzzy search '{}' on {}: {} above {}",
            keyword,
            field,
            scored.len(),
            threshold
        );
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;
    use crate::test_support::record;
    use pretty_assertions::assert_eq;

    fn with_institution(id: &str, name: &str) -> ScholarshipRecord {
        let mut r = record(id, "Asia", "Fully Funded");
        r.institution_name = name.to_string();
        r
    }

    #[test]
    fn test_identical_strings_score_100() {
        let metric = JaroWinkler;
        assert_eq!(metric.score("Chevening", "Chevening"), 100.0);
        // Case and surrounding whitespace are normalized away.
        assert_eq!(metric.score("  chevening ", "CHEVENING"), 100.0);
    }

    #[test]
    fn test_metric_is_symmetric() {
        let metric = JaroWinkler;
        let ab = metric.score("Erasmus Mundus", "Erasmus");
        let ba = metric.score("Erasmus", "Erasmus Mundus");
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_score_decreases_with_edit_distance() {
        let metric = JaroWinkler;
        let close = metric.score("Chevening", "Chevenin");
        let far = metric.score("Chevening", "Chevi");
        assert!(close > far);
        assert!(far > metric.score("Chevening", "Fulbright"));
    }

    #[test]
    fn test_threshold_100_keeps_only_exact_matches() {
        let records = vec![
            with_institution("B001", "Chevening"),
            with_institution("B002", "chevening  "),
            with_institution("B003", "Chevenin"),
        ];
        let engine = FuzzySearch::new();
        // Strictly-greater keep rule: nothing exceeds 100.
        let hits = engine
            .search(&records, "Chevening", None, Some(100.0))
            .unwrap();
        assert!(hits.is_empty());

        // Just under 100 keeps exactly the normalized-exact matches.
        let hits = engine
            .search(&records, "Chevening", None, Some(99.9))
            .unwrap();
        let ids: Vec<_> = hits.iter().map(|(r, _)| r.id.as_str()).collect();
        assert_eq!(ids, vec!["B001", "B002"]);
    }

    #[test]
    fn test_near_miss_survives_default_threshold() {
        let records = vec![
            with_institution("B001", "Chevening Scholarship"),
            with_institution("B002", "DAAD"),
        ];
        let engine = FuzzySearch::new();
        let hits = engine.search(&records, "Chevening", None, None).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0.id, "B001");
    }

    #[test]
    fn test_unset_field_never_matches() {
        let records = vec![record("B001", "Asia", "Fully Funded")]; // top_university: None
        let engine = FuzzySearch::new();
        let hits = engine
            .search(&records, "anything", Some("top_university"), Some(0.0))
            .unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_unknown_field_is_invalid_attribute() {
        let engine = FuzzySearch::new();
        let err = engine
            .search(&[], "x", Some("campus"), None)
            .unwrap_err();
        assert_eq!(err, QueryError::InvalidAttribute("campus".to_string()));
    }
}
