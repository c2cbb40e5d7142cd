//! Weekly Report
//!
//! The backend renders the spreadsheet; the client only names the file after
//! the week it covers.

use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;

/// MIME type of the generated spreadsheet
pub const REPORT_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Inclusive Sunday..=Saturday week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekRange {
    /// The week containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        let offset = date.weekday().num_days_from_sunday() as i64;
        let start = date - Duration::days(offset);
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start..=self.end).contains(&date)
    }
}

impl fmt::Display for WeekRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_to_{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Download name for the report covering the week of `today`
pub fn weekly_report_filename(today: NaiveDate) -> String {
    format!("weekly-report_{}.xlsx", WeekRange::containing(today))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_starts_on_sunday() {
        let week = WeekRange::containing(date(2026, 10, 19));
        assert_eq!(week.start, date(2026, 10, 18));
        assert_eq!(week.end, date(2026, 10, 24));
        assert!(week.contains(date(2026, 10, 24)));
        assert!(!week.contains(date(2026, 10, 25)));
    }

    #[test]
    fn test_sunday_and_saturday_edges() {
        assert_eq!(WeekRange::containing(date(2026, 10, 18)).start, date(2026, 10, 18));
        assert_eq!(WeekRange::containing(date(2026, 10, 24)).start, date(2026, 10, 18));
    }

    #[test]
    fn test_filename_across_year_boundary() {
        assert_eq!(
            weekly_report_filename(date(2026, 1, 1)),
            "weekly-report_2025-12-28_to_2026-01-03.xlsx"
        );
    }
}
