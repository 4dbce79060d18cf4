//! Purchase date extraction.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Captures;

use super::patterns::{
    DATE_DAY_MONTH_YEAR, DATE_DMY_DASH, DATE_DMY_SLASH, DATE_YMD_DASH, DATE_YMD_SLASH,
};
use super::{first_match, ExtractionMatch, FieldExtractor, Rule};

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

lazy_static! {
    static ref DATE_RULES: [Rule<NaiveDateTime>; 5] = [
        Rule::new("dd/mm/yyyy", &DATE_DMY_SLASH, parse_numeric),
        Rule::new("dd-mm-yyyy", &DATE_DMY_DASH, parse_numeric),
        Rule::new("yyyy/mm/dd", &DATE_YMD_SLASH, parse_year_first),
        Rule::new("yyyy-mm-dd", &DATE_YMD_DASH, parse_year_first),
        Rule::new("d month yyyy", &DATE_DAY_MONTH_YEAR, parse_day_month_name),
    ];
}

/// Purchase date extractor.
///
/// Only the first occurrence of each pattern is considered. When that
/// occurrence is not a real calendar date the next pattern is tried.
#[derive(Debug, Default)]
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for DateExtractor {
    type Output = NaiveDateTime;

    fn extract(&self, text: &str) -> Option<ExtractionMatch<Self::Output>> {
        first_match(DATE_RULES.as_slice(), text)
    }
}

/// `NN/NN/YYYY` read month first; the numbers are swapped only when the
/// month-first reading is not a valid date (e.g. `15/01/2024`).
fn parse_numeric(caps: &Captures<'_>) -> Option<NaiveDateTime> {
    let first: u32 = caps[1].parse().ok()?;
    let second: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;

    NaiveDate::from_ymd_opt(year, first, second)
        .or_else(|| NaiveDate::from_ymd_opt(year, second, first))
        .map(at_midnight)
}

fn parse_year_first(caps: &Captures<'_>) -> Option<NaiveDateTime> {
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day).map(at_midnight)
}

fn parse_day_month_name(caps: &Captures<'_>) -> Option<NaiveDateTime> {
    let day: u32 = caps[1].parse().ok()?;
    let month = month_from_name(&caps[2])?;
    let year: i32 = caps[3].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day).map(at_midnight)
}

/// Resolve an English month name or its three-letter abbreviation.
fn month_from_name(name: &str) -> Option<u32> {
    let name = name.to_lowercase();

    MONTHS
        .iter()
        .position(|full| name == *full || name == full[..3] || (name == "sept" && *full == "september"))
        .map(|idx| idx as u32 + 1)
}

fn at_midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_time(NaiveTime::MIN)
    }

    #[test]
    fn test_extract_dmy_slash() {
        let result = DateExtractor::new().extract("Date: 15/01/2024 10:32").unwrap();
        assert_eq!(result.value, date(2024, 1, 15));
        assert_eq!(result.rule, "dd/mm/yyyy");
    }

    #[test]
    fn test_ambiguous_numeric_date_is_month_first() {
        let result = DateExtractor::new().extract("Shop\n02/07/2024").unwrap();
        assert_eq!(result.value, date(2024, 2, 7));

        let result = DateExtractor::new().extract("12/25/2024").unwrap();
        assert_eq!(result.value, date(2024, 12, 25));

        let result = DateExtractor::new().extract("03-04-2024").unwrap();
        assert_eq!(result.value, date(2024, 3, 4));
        assert_eq!(result.rule, "dd-mm-yyyy");
    }

    #[test]
    fn test_extract_ymd() {
        let result = DateExtractor::new().extract("2024-01-15").unwrap();
        assert_eq!(result.value, date(2024, 1, 15));

        let result = DateExtractor::new().extract("2024/03/09").unwrap();
        assert_eq!(result.value, date(2024, 3, 9));
    }

    #[test]
    fn test_extract_month_name() {
        let result = DateExtractor::new().extract("Sold on 5 Mar 2024").unwrap();
        assert_eq!(result.value, date(2024, 3, 5));

        let result = DateExtractor::new().extract("21 September 2023").unwrap();
        assert_eq!(result.value, date(2023, 9, 21));

        let result = DateExtractor::new().extract("1 Sept 2023").unwrap();
        assert_eq!(result.value, date(2023, 9, 1));
    }

    #[test]
    fn test_unknown_month_word_does_not_parse() {
        assert!(DateExtractor::new().extract("3 Junk 2024").is_none());
    }

    #[test]
    fn test_invalid_earlier_pattern_falls_back_to_later() {
        let text = "Ref 45/45/2024\nPurchased 2024-02-29";
        let result = DateExtractor::new().extract(text).unwrap();
        assert_eq!(result.value, date(2024, 2, 29));
        assert_eq!(result.rule, "yyyy-mm-dd");
    }

    #[test]
    fn test_pattern_priority_over_position() {
        // The ISO date appears first but DD/MM/YYYY has priority.
        let text = "2023-06-01\n02/07/2024";
        let result = DateExtractor::new().extract(text).unwrap();
        assert_eq!(result.value, date(2024, 2, 7));
    }

    #[test]
    fn test_no_date() {
        assert!(DateExtractor::new().extract("no dates here").is_none());
    }
}
