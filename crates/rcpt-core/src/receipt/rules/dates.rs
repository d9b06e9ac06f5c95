//! Date detection for receipts.

use chrono::NaiveDate;

use super::patterns::DATE_DMY;
use super::{FieldRule, RuleMatch};

/// Format of extracted dates.
pub const CANONICAL_DATE_FORMAT: &str = "%d-%m-%Y";

/// Date field detector.
///
/// Finds `DD-MM-YYYY` / `DD/MM/YYYY` shaped tokens and rewrites every
/// separator to `-`. The calendar value is not checked here.
pub struct DateRule;

impl DateRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateRule {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldRule for DateRule {
    type Output = RuleMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        DATE_DMY.find(text).map(normalize)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE_DMY.find_iter(text).map(normalize).collect()
    }
}

fn normalize(m: regex::Match<'_>) -> RuleMatch<String> {
    RuleMatch::new(m.as_str().replace('/', "-"), m.as_str()).with_position(m.start(), m.end())
}

/// Detect the first date in `text`, or format `today` when there is none.
pub fn detect_date(text: &str, today: NaiveDate) -> String {
    DateRule::new()
        .extract(text)
        .map(|m| m.value)
        .unwrap_or_else(|| today.format(CANONICAL_DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 5).unwrap()
    }

    #[test]
    fn test_slashes_normalized() {
        assert_eq!(detect_date("Paid on 01/02/2023", today()), "01-02-2023");
    }

    #[test]
    fn test_mixed_separators_normalized() {
        assert_eq!(detect_date("12/04-2024", today()), "12-04-2024");
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(
            detect_date("Bill 15-03-2024 due 30-03-2024", today()),
            "15-03-2024"
        );
    }

    #[test]
    fn test_fallback_to_today() {
        assert_eq!(detect_date("no date here", today()), "05-07-2024");
        assert_eq!(detect_date("", today()), "05-07-2024");
    }

    #[test]
    fn test_calendar_value_not_checked() {
        assert_eq!(detect_date("99/99/2024", today()), "99-99-2024");
    }

    #[test]
    fn test_extract_all_positions() {
        let matches = DateRule::new().extract_all("a 01/01/2024 b 02-02-2024");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].source, "01/01/2024");
        assert_eq!(matches[0].position, Some((2, 12)));
        assert_eq!(matches[1].value, "02-02-2024");
    }
}
