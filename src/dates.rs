//! Due-date parsing and formatting at whole-day granularity.

use chrono::{Duration, NaiveDate};

/// ISO-8601 calendar date format used for storage and display.
pub const ISO_DATE: &str = "%Y-%m-%d";

/// Parse a due date typed by the user, relative to `today`.
///
/// Supports:
/// - "YYYY-MM-DD"
/// - "today", "tomorrow", "yesterday"
/// - "in 3d", "in 2w"
pub fn parse_due_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return today.checked_add_signed(Duration::days(1)),
        "yesterday" => return today.checked_sub_signed(Duration::days(1)),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return today.checked_add_signed(Duration::try_days(days)?);
            }
        }
        if let Some(nw) = rest.strip_suffix('w') {
            if let Ok(weeks) = nw.trim().parse::<i64>() {
                return today.checked_add_signed(Duration::try_weeks(weeks)?);
            }
        }
        return None;
    }

    NaiveDate::parse_from_str(&s, ISO_DATE).ok()
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: NaiveDate, today: NaiveDate) -> String {
    let days = (due - today).num_days();
    match days {
        0 => "today".into(),
        1 => "tomorrow".into(),
        d if d > 1 => format!("in {d}d"),
        d => format!("{}d late", -d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, ISO_DATE).unwrap()
    }

    #[test]
    fn parses_iso_and_shorthands() {
        let today = date("2024-02-28");
        assert_eq!(parse_due_input("2024-03-05", today), Some(date("2024-03-05")));
        assert_eq!(parse_due_input(" Today ", today), Some(today));
        assert_eq!(parse_due_input("tomorrow", today), Some(date("2024-02-29")));
        assert_eq!(parse_due_input("yesterday", today), Some(date("2024-02-27")));
        assert_eq!(parse_due_input("in 3d", today), Some(date("2024-03-02")));
        assert_eq!(parse_due_input("in 2w", today), Some(date("2024-03-13")));
    }

    #[test]
    fn rejects_garbage() {
        let today = date("2024-02-28");
        assert_eq!(parse_due_input("soon", today), None);
        assert_eq!(parse_due_input("2024-13-01", today), None);
        assert_eq!(parse_due_input("in xd", today), None);
        assert_eq!(parse_due_input("", today), None);
    }

    #[test]
    fn relative_formatting() {
        let today = date("2024-01-10");
        assert_eq!(format_due_relative(today, today), "today");
        assert_eq!(format_due_relative(date("2024-01-11"), today), "tomorrow");
        assert_eq!(format_due_relative(date("2024-01-13"), today), "in 3d");
        assert_eq!(format_due_relative(date("2024-01-08"), today), "2d late");
    }
}
