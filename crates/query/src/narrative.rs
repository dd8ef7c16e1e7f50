use crate::aggregate::{GroupCount, GroupShare};

/// One sentence naming the leading group and its share of the catalog.
///
/// `label` is the human name of the grouped attribute ("scholarship type").
/// Empty aggregates yield no sentence.
pub fn leading_share_sentence(label: &str, shares: &[GroupShare]) -> Option<String> {
    let top = shares.first()?;
    Some(format!(
        "Most scholarships fall under the {} \"{}\", covering {}% of the catalog.",
        label, top.value, top.percent
    ))
}

/// One sentence naming the most frequent entity and its raw count.
///
/// Used for per-record top-1 views like the busiest university.
pub fn busiest_entity_sentence(label: &str, groups: &[GroupCount]) -> Option<String> {
    let top = groups.first()?;
    let noun = if top.count == 1 { "entry" } else { "entries" };
    Some(format!(
        "The {} appearing most often is \"{}\" with {} {}.",
        label, top.value, top.count, noun
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{proportion_summary, top_n};
    use crate::test_support::record;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_leading_share_names_value_and_percentage() {
        let records = vec![
            record("B001", "Asia", "Fully Funded"),
            record("B002", "Europe", "Partial"),
            record("B003", "Asia", "Fully Funded"),
        ];
        let shares = proportion_summary(&records, "scholarship_type").unwrap();
        let sentence = leading_share_sentence("scholarship type", &shares).unwrap();
        assert_eq!(
            sentence,
            "Most scholarships fall under the scholarship type \"Fully Funded\", \
             covering 66.7% of the catalog."
        );
    }

    #[test]
    fn test_busiest_entity_names_value_and_count() {
        let mut records = vec![
            record("B001", "Asia", "Fully Funded"),
            record("B002", "Asia", "Partial"),
        ];
        records[0].top_university = Some("University of Tokyo".to_string());
        records[1].top_university = Some("University of Tokyo".to_string());

        let groups = top_n(&records, "top_university", Some(1)).unwrap();
        let sentence = busiest_entity_sentence("university", &groups).unwrap();
        assert_eq!(
            sentence,
            "The university appearing most often is \"University of Tokyo\" with 2 entries."
        );
    }

    #[test]
    fn test_empty_aggregates_yield_no_sentence() {
        assert_eq!(leading_share_sentence("type", &[]), None);
        assert_eq!(busiest_entity_sentence("university", &[]), None);
    }
}
