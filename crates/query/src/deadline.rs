use chrono::{Datelike, Duration, NaiveDate};

use catalog_model::ScholarshipRecord;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Best-effort "closing soon" signal over the free-text application window.
///
/// The window is not a real date range: the only structure relied on is a
/// hyphen with a month name after it ("April - May", "1 March-15 June").
/// A record is kept iff the trailing segment names the reference date's
/// month or the month 30 days later. Anything else (no hyphen, trailing
/// segment not a month name) is silently excluded; this is a display
/// heuristic, not date arithmetic, and deliberately ignores years.
pub fn closing_soon(records: &[ScholarshipRecord], reference: NaiveDate) -> Vec<ScholarshipRecord> {
    let this_month = reference.month0() as usize;
    let next_month = (reference + Duration::days(30)).month0() as usize;

    let hits: Vec<ScholarshipRecord> = records
        .iter()
        .filter(|record| match closing_month(&record.application_window) {
            Some(month) => month == this_month || month == next_month,
            None => {
                log::debug!(
                    "no closing month in window text of {}: {:?}",
                    record.id,
                    record.application_window
                );
                false
            }
        })
        .cloned()
        .collect();
    log::debug!("closing soon as of {}: {} records", reference, hits.len());
    hits
}

/// Zero-based month index of the window's trailing segment, if it parses.
fn closing_month(window: &str) -> Option<usize> {
    let (_, tail) = window.rsplit_once('-')?;
    let tail = tail.trim().to_lowercase();
    MONTHS.iter().position(|month| *month == tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;
    use pretty_assertions::assert_eq;

    fn with_window(id: &str, window: &str) -> ScholarshipRecord {
        let mut r = record(id, "Asia", "Fully Funded");
        r.application_window = window.to_string();
        r
    }

    fn march_15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_matches_reference_month() {
        let records = vec![with_window("B001", "January - March")];
        let hits = closing_soon(&records, march_15());
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_matches_month_30_days_ahead() {
        // 2024-03-15 + 30 days = 2024-04-14.
        let records = vec![with_window("B001", "February - April")];
        let hits = closing_soon(&records, march_15());
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_month_comparison_ignores_case_and_padding() {
        let records = vec![with_window("B001", "january -  MARCH  ")];
        assert_eq!(closing_soon(&records, march_15()).len(), 1);
    }

    #[test]
    fn test_splits_on_the_last_hyphen() {
        // Two hyphens: only the trailing segment counts.
        let records = vec![with_window("B001", "mid-January - March")];
        assert_eq!(closing_soon(&records, march_15()).len(), 1);
    }

    #[test]
    fn test_other_months_are_excluded() {
        let records = vec![with_window("B001", "June - December")];
        assert!(closing_soon(&records, march_15()).is_empty());
    }

    #[test]
    fn test_malformed_windows_are_silently_excluded() {
        let records = vec![
            with_window("B001", "rolling admissions"),   // no hyphen
            with_window("B002", "March until further"),  // no hyphen
            with_window("B003", "January - week 12"),    // trailing segment not a month
            with_window("B004", ""),                     // empty
        ];
        assert!(closing_soon(&records, march_15()).is_empty());
    }

    #[test]
    fn test_empty_input_is_fine() {
        assert!(closing_soon(&[], march_15()).is_empty());
    }
}
