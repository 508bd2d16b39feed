//! Date parsing for loosely formatted announcement dates
//!
//! The annotator copies dates the way the announcements print them:
//! "April 16, 2034", "Sept. 30, 2025", "Jan, 2025". Everything here returns
//! `None` on malformed input; callers treat that as a rejection.

use chrono::NaiveDate;
use tracing::debug;

/// Abbreviation table, matched case-insensitively after dropping a trailing period
const MONTHS: [(&str, &str, u32); 13] = [
    ("jan", "January", 1),
    ("feb", "February", 2),
    ("mar", "March", 3),
    ("apr", "April", 4),
    ("may", "May", 5),
    ("jun", "June", 6),
    ("jul", "July", 7),
    ("aug", "August", 8),
    ("sep", "September", 9),
    ("sept", "September", 9),
    ("oct", "October", 10),
    ("nov", "November", 11),
    ("dec", "December", 12),
];

/// Normalize a month token to its full English name
///
/// Accepts full names and abbreviations, with or without a trailing period
/// or comma.
///
/// # Examples
///
/// ```
/// use dodcon_domain::normalize_month;
///
/// assert_eq!(normalize_month("Jan."), Some("January"));
/// assert_eq!(normalize_month("Sept."), Some("September"));
/// assert_eq!(normalize_month("March"), Some("March"));
/// assert_eq!(normalize_month("Smarch"), None);
/// ```
pub fn normalize_month(token: &str) -> Option<&'static str> {
    month_entry(token).map(|(_, full, _)| full)
}

fn month_number(token: &str) -> Option<u32> {
    month_entry(token).map(|(_, _, number)| number)
}

fn month_entry(token: &str) -> Option<(&'static str, &'static str, u32)> {
    let token = token.trim_end_matches(',').trim_end_matches('.');
    if token.is_empty() {
        return None;
    }
    let lower = token.to_ascii_lowercase();

    MONTHS
        .iter()
        .copied()
        .find(|(abbr, full, _)| lower == *abbr || lower == full.to_ascii_lowercase())
}

/// Parse a human-written date into a calendar date
///
/// Recognized shapes:
/// - `"<Month> <Day>, <Year>"`: "April 16, 2034", "Jan. 5, 2024"
/// - `"<Month>, <Year>"`: "Jan, 2025" (day defaults to 1)
/// - `"<Month> <Year>"`: "Jan 2025" (day defaults to 1)
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dodcon_domain::parse_date;
///
/// assert_eq!(parse_date("April 16, 2034"), NaiveDate::from_ymd_opt(2034, 4, 16));
/// assert_eq!(parse_date("Jan. 5, 2024"), parse_date("January 5, 2024"));
/// assert_eq!(parse_date("Jan, 2025"), NaiveDate::from_ymd_opt(2025, 1, 1));
/// assert_eq!(parse_date("sometime next year"), None);
/// ```
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let parsed = match tokens.as_slice() {
        [month, day, year] => {
            let day = day.strip_suffix(',')?;
            build_date(month, day, year)
        }
        [month, year] => build_date(month.trim_end_matches(','), "1", year),
        _ => None,
    };

    if parsed.is_none() {
        debug!("Unparseable date: {:?}", text);
    }
    parsed
}

fn build_date(month: &str, day: &str, year: &str) -> Option<NaiveDate> {
    let month = month_number(month)?;
    if !day.chars().all(|c| c.is_ascii_digit()) || !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let day: u32 = day.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Render a date the way announcements print it: "April 16, 2034"
///
/// Days are zero-padded ("January 05, 2024"); see
/// [`format_long_date_unpadded`] for the other spelling.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Render a date without day padding: "January 5, 2024"
pub fn format_long_date_unpadded(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_full_month_name() {
        assert_eq!(parse_date("April 16, 2034"), Some(ymd(2034, 4, 16)));
    }

    #[test]
    fn test_abbreviations_match_full_names() {
        assert_eq!(parse_date("Jan. 5, 2024"), parse_date("January 5, 2024"));
        assert_eq!(parse_date("Jan 5, 2024"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date("Sept. 30, 2025"), Some(ymd(2025, 9, 30)));
        assert_eq!(parse_date("Sep. 30, 2025"), Some(ymd(2025, 9, 30)));
        assert_eq!(parse_date("Dec. 31, 2029"), Some(ymd(2029, 12, 31)));
        assert_eq!(parse_date("May 1, 2026"), Some(ymd(2026, 5, 1)));
    }

    #[test]
    fn test_month_and_year_defaults_to_first() {
        assert_eq!(parse_date("Jan, 2025"), Some(ymd(2025, 1, 1)));
        assert_eq!(parse_date("February, 2027"), Some(ymd(2027, 2, 1)));
        assert_eq!(parse_date("Jan 2025"), Some(ymd(2025, 1, 1)));
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(parse_date("  March 3, 2030 "), Some(ymd(2030, 3, 3)));
    }

    #[test]
    fn test_wrong_token_count() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2034"), None);
        assert_eq!(parse_date("on April 16, 2034"), None);
    }

    #[test]
    fn test_missing_comma_after_day() {
        assert_eq!(parse_date("April 16 2034"), None);
    }

    #[test]
    fn test_bad_components() {
        assert_eq!(parse_date("Smarch 16, 2034"), None);
        assert_eq!(parse_date("April sixteen, 2034"), None);
        assert_eq!(parse_date("April 16, 20x4"), None);
        assert_eq!(parse_date("April -1, 2034"), None);
        assert_eq!(parse_date("February 30, 2025"), None);
        assert_eq!(parse_date("To be determined"), None);
    }

    #[test]
    fn test_iso_dates_are_not_accepted() {
        assert_eq!(parse_date("2034-04-16"), None);
    }

    #[test]
    fn test_normalize_month() {
        assert_eq!(normalize_month("Feb."), Some("February"));
        assert_eq!(normalize_month("aug"), Some("August"));
        assert_eq!(normalize_month("December,"), Some("December"));
        assert_eq!(normalize_month("."), None);
    }

    #[test]
    fn test_format_long_date() {
        assert_eq!(format_long_date(ymd(2034, 4, 16)), "April 16, 2034");
        assert_eq!(format_long_date(ymd(2024, 1, 5)), "January 05, 2024");
        assert_eq!(format_long_date_unpadded(ymd(2024, 1, 5)), "January 5, 2024");
    }

    #[test]
    fn test_format_then_parse() {
        let date = ymd(2031, 11, 9);
        assert_eq!(parse_date(&format_long_date(date)), Some(date));
        assert_eq!(parse_date(&format_long_date_unpadded(date)), Some(date));
    }
}
