//! Check-in Time Formatting
//!
//! Recent times (within the last five days, or in the future) render as a
//! distance plus a calendar-relative phrase, e.g.
//! `"3 minutes ago • today at 2:57 PM"`. Older times render as an absolute
//! date, with the year only when it differs from the current one.

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};
use std::fmt::Display;

/// Times newer than this render relative to now
pub const RECENT_WINDOW_DAYS: i64 = 5;

/// Placeholder for a user without a check-in time
pub const MISSING_TIME: &str = "N/A";

const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2520;
const MINUTES_IN_MONTH: i64 = 43200;
const MINUTES_IN_TWO_MONTHS: i64 = 86400;

const TIME_OF_DAY: &str = "%-I:%M %p";

/// Format `date` relative to the local clock.
pub fn format_date(date: DateTime<Utc>) -> String {
    format_date_at(date, chrono::Local::now())
}

/// Format an optional check-in time, `N/A` when absent.
pub fn format_check_in_time(date: Option<DateTime<Utc>>) -> String {
    date.map(format_date)
        .unwrap_or_else(|| MISSING_TIME.to_string())
}

/// Format `date` as seen at `now`, in `now`'s time zone.
pub fn format_date_at<Tz>(date: DateTime<Utc>, now: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let date = date.with_timezone(&now.timezone());

    if date > now.clone() - Duration::days(RECENT_WINDOW_DAYS) {
        format!(
            "{} • {}",
            distance_to_now(&date, &now),
            relative_to(&date, &now)
        )
    } else if date.year() == now.year() {
        date.format("%a, %b %-d at %-I:%M %p").to_string()
    } else {
        date.format("%a, %b %-d, %Y at %-I:%M %p").to_string()
    }
}

/// Approximate distance with a direction suffix: `"5 minutes ago"`, `"in 1 day"`.
pub fn distance_to_now<Tz: TimeZone>(date: &DateTime<Tz>, now: &DateTime<Tz>) -> String {
    let future = date > now;
    let (earlier, later) = if future { (now, date) } else { (date, now) };

    let phrase = distance_phrase(earlier, later);
    if future {
        format!("in {}", phrase)
    } else {
        format!("{} ago", phrase)
    }
}

fn distance_phrase<Tz: TimeZone>(earlier: &DateTime<Tz>, later: &DateTime<Tz>) -> String {
    let seconds = (later.clone() - earlier.clone()).num_seconds();
    let minutes = (seconds as f64 / 60.0).round() as i64;

    if minutes < 2 {
        return if minutes < 1 {
            "less than a minute".to_string()
        } else {
            "1 minute".to_string()
        };
    }
    if minutes < 45 {
        return format!("{} minutes", minutes);
    }
    if minutes < 90 {
        return "about 1 hour".to_string();
    }
    if minutes < MINUTES_IN_DAY {
        let hours = (minutes as f64 / 60.0).round() as i64;
        return format!("about {} hours", hours);
    }
    if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
        return "1 day".to_string();
    }
    if minutes < MINUTES_IN_MONTH {
        let days = (minutes as f64 / MINUTES_IN_DAY as f64).round() as i64;
        return format!("{} days", days);
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        let months = (minutes as f64 / MINUTES_IN_MONTH as f64).round() as i64;
        return plural(months, "about 1 month", "about {} months");
    }

    let months = months_between(earlier, later);
    if months < 12 {
        let nearest = (minutes as f64 / MINUTES_IN_MONTH as f64).round() as i64;
        return plural(nearest, "1 month", "{} months");
    }

    let remainder = months % 12;
    let years = months / 12;
    if remainder < 3 {
        plural(years, "about 1 year", "about {} years")
    } else if remainder < 9 {
        plural(years, "over 1 year", "over {} years")
    } else {
        plural(years + 1, "almost 1 year", "almost {} years")
    }
}

fn plural(count: i64, one: &str, other: &str) -> String {
    if count == 1 {
        one.to_string()
    } else {
        other.replace("{}", &count.to_string())
    }
}

fn months_between<Tz: TimeZone>(earlier: &DateTime<Tz>, later: &DateTime<Tz>) -> i64 {
    let mut months = (later.year() - earlier.year()) as i64 * 12 + later.month() as i64
        - earlier.month() as i64;
    let later_pos = (later.day(), later.num_seconds_from_midnight());
    let earlier_pos = (earlier.day(), earlier.num_seconds_from_midnight());
    if months > 0 && later_pos < earlier_pos {
        months -= 1;
    }
    months
}

/// Calendar-relative phrase: `"yesterday at 9:15 AM"`, `"last Friday at 10:00 AM"`.
pub fn relative_to<Tz>(date: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let days = (date.date_naive() - now.date_naive()).num_days();
    let time = date.format(TIME_OF_DAY);

    match days {
        d if d < -6 => date.format("%m/%d/%Y").to_string(),
        d if d < -1 => format!("last {} at {}", date.format("%A"), time),
        -1 => format!("yesterday at {}", time),
        0 => format!("today at {}", time),
        1 => format!("tomorrow at {}", time),
        d if d < 7 => format!("{} at {}", date.format("%A"), time),
        _ => date.format("%m/%d/%Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 15, 0, 0).unwrap()
    }

    #[test]
    fn test_minutes_ago_today() {
        let date = now() - Duration::minutes(3);
        assert_eq!(format_date_at(date, now()), "3 minutes ago • today at 2:57 PM");
    }

    #[test]
    fn test_less_than_a_minute() {
        let date = now() - Duration::seconds(20);
        assert_eq!(
            format_date_at(date, now()),
            "less than a minute ago • today at 2:59 PM"
        );
    }

    #[test]
    fn test_yesterday() {
        let date = Utc.with_ymd_and_hms(2026, 10, 18, 13, 0, 0).unwrap();
        assert_eq!(format_date_at(date, now()), "1 day ago • yesterday at 1:00 PM");
    }

    #[test]
    fn test_last_weekday() {
        let date = Utc.with_ymd_and_hms(2026, 10, 16, 10, 0, 0).unwrap();
        assert_eq!(
            format_date_at(date, now()),
            "3 days ago • last Friday at 10:00 AM"
        );
    }

    #[test]
    fn test_future_time() {
        let date = now() + Duration::hours(2);
        assert_eq!(
            format_date_at(date, now()),
            "in about 2 hours • today at 5:00 PM"
        );
    }

    #[test]
    fn test_older_same_year() {
        let date = Utc.with_ymd_and_hms(2026, 3, 5, 9, 5, 0).unwrap();
        assert_eq!(format_date_at(date, now()), "Thu, Mar 5 at 9:05 AM");
    }

    #[test]
    fn test_older_previous_year() {
        let date = Utc.with_ymd_and_hms(2025, 12, 25, 18, 30, 0).unwrap();
        assert_eq!(format_date_at(date, now()), "Thu, Dec 25, 2025 at 6:30 PM");
    }

    #[test]
    fn test_distance_buckets() {
        let n = now();
        assert_eq!(distance_to_now(&(n - Duration::minutes(70)), &n), "about 1 hour ago");
        assert_eq!(distance_to_now(&(n - Duration::minutes(90)), &n), "about 2 hours ago");
        assert_eq!(distance_to_now(&(n - Duration::days(10)), &n), "10 days ago");
        assert_eq!(distance_to_now(&(n - Duration::days(45)), &n), "about 2 months ago");
        assert_eq!(distance_to_now(&(n - Duration::days(100)), &n), "3 months ago");
        assert_eq!(distance_to_now(&(n - Duration::days(400)), &n), "about 1 year ago");
    }

    #[test]
    fn test_relative_far_dates_use_numeric_format() {
        let n = now();
        let date = n - Duration::days(8);
        assert_eq!(relative_to(&date, &n), "10/11/2026");
        let date = n + Duration::days(3);
        assert_eq!(relative_to(&date, &n), "Thursday at 3:00 PM");
    }

    #[test]
    fn test_missing_check_in_time() {
        assert_eq!(format_check_in_time(None), "N/A");
    }
}
