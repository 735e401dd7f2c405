//! # Date Math
//! Pure calendar arithmetic shared by the month grid, the weekly forecast and the
//! news list: weekday classification, month boundaries and relative-time buckets.
//!
//! Weeks are Sunday-first everywhere in the panel.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, TimeZone, Timelike, Weekday};
use serde::Serialize;

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub const WEEKDAY_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Styling class derived from a weekday (first/last column of a Sunday-first week).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayClass {
    Ordinary,
    Sunday,
    Saturday,
}

impl DayClass {
    pub fn from_weekday(wd: Weekday) -> Self {
        match wd {
            Weekday::Sun => DayClass::Sunday,
            Weekday::Sat => DayClass::Saturday,
            _ => DayClass::Ordinary,
        }
    }

    /// Class of a 0-based column in a Sunday-first grid.
    pub fn from_column(column: usize) -> Self {
        match column % 7 {
            0 => DayClass::Sunday,
            6 => DayClass::Saturday,
            _ => DayClass::Ordinary,
        }
    }
}

/// 0 = Sunday .. 6 = Saturday.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

pub fn weekday_name(wd: Weekday) -> &'static str {
    WEEKDAY_NAMES[wd.num_days_from_sunday() as usize]
}

pub fn weekday_short(wd: Weekday) -> &'static str {
    WEEKDAY_SHORT[wd.num_days_from_sunday() as usize]
}

/// Number of days in `month` (1-based), `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some(last.day())
}

/// Weekday of the 1st of `month`.
pub fn first_weekday(year: i32, month: u32) -> Option<Weekday> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|d| d.weekday())
}

pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Calendar date of a timestamp string such as `2024-01-15T00:00:00+09:00`,
/// taken in the timestamp's own offset. Bare `YYYY-MM-DD` prefixes are accepted too.
pub fn date_of_timestamp(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    s.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Bucketed age of a published item relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeTime {
    /// Published in the future (clock skew or pre-dated items).
    New,
    JustNow,
    Minutes(i64),
    Hours(i64),
    Yesterday,
    Days(i64),
    Date { month: u32, day: u32 },
}

impl RelativeTime {
    /// Items a day or more old are rendered dimmed.
    pub fn is_old(&self) -> bool {
        matches!(
            self,
            RelativeTime::Yesterday | RelativeTime::Days(_) | RelativeTime::Date { .. }
        )
    }
}

impl fmt::Display for RelativeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelativeTime::New => write!(f, "new"),
            RelativeTime::JustNow => write!(f, "just now"),
            RelativeTime::Minutes(n) => write!(f, "{n} minutes ago"),
            RelativeTime::Hours(n) => write!(f, "{n} hours ago"),
            RelativeTime::Yesterday => write!(f, "yesterday"),
            RelativeTime::Days(n) => write!(f, "{n} days ago"),
            RelativeTime::Date { month, day } => write!(f, "{month}/{day}"),
        }
    }
}

/// Relative-time bucket of `published` seen from `now`.
///
/// Buckets use floored whole units: under a minute is "just now", a full 24h up to
/// (but excluding) 48h is "yesterday", a week or more falls back to the published
/// month/day in `published`'s timezone.
pub fn relative_time<Tz: TimeZone>(published: &DateTime<Tz>, now: &DateTime<Tz>) -> RelativeTime {
    let delta = now.clone().signed_duration_since(published.clone());
    if delta < Duration::zero() {
        return RelativeTime::New;
    }

    let mins = delta.num_minutes();
    let hours = delta.num_hours();
    let days = delta.num_days();

    if mins < 1 {
        RelativeTime::JustNow
    } else if mins < 60 {
        RelativeTime::Minutes(mins)
    } else if hours < 24 {
        RelativeTime::Hours(hours)
    } else if days == 1 {
        RelativeTime::Yesterday
    } else if days < 7 {
        RelativeTime::Days(days)
    } else {
        RelativeTime::Date {
            month: published.month(),
            day: published.day(),
        }
    }
}

/// `HH:MM` wall clock label.
pub fn clock_label<Tz: TimeZone>(now: &DateTime<Tz>) -> String {
    format!("{:02}:{:02}", now.hour(), now.minute())
}

/// Delay until one second past the next local midnight.
pub fn until_next_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> std::time::Duration {
    let fallback = std::time::Duration::from_secs(60);
    let Some(tomorrow) = now.date_naive().succ_opt() else {
        return fallback;
    };
    let Some(target_naive) = tomorrow.and_hms_opt(0, 0, 1) else {
        return fallback;
    };
    match now.timezone().from_local_datetime(&target_naive).earliest() {
        Some(target) => target
            .signed_duration_since(now.clone())
            .to_std()
            .unwrap_or(fallback),
        None => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn month_lengths_cover_leap_years() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(2024, 4), Some(30));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn month_neighbours_wrap_years() {
        assert_eq!(previous_month(2024, 1), (2023, 12));
        assert_eq!(next_month(2024, 12), (2025, 1));
        assert_eq!(next_month(2024, 6), (2024, 7));
    }

    #[test]
    fn weekday_helpers_are_sunday_first() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(weekday_index(d), 1);
        assert_eq!(first_weekday(2024, 1), Some(Weekday::Mon));
        assert_eq!(weekday_short(Weekday::Sun), "Sun");
        assert_eq!(DayClass::from_column(13), DayClass::Saturday);
        assert_eq!(DayClass::from_weekday(Weekday::Wed), DayClass::Ordinary);
    }

    #[test]
    fn timestamp_dates_use_own_offset() {
        assert_eq!(
            date_of_timestamp("2024-01-15T00:00:00+09:00"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(
            date_of_timestamp("2024-01-15"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(date_of_timestamp("soon"), None);
    }

    #[test]
    fn midnight_delay_is_within_a_day() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 23, 59, 0).unwrap();
        assert_eq!(
            until_next_midnight(&now),
            std::time::Duration::from_secs(61)
        );
        let early = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(
            until_next_midnight(&early),
            std::time::Duration::from_secs(24 * 3600 + 1)
        );
    }

    #[test]
    fn clock_label_pads() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 7, 5, 9).unwrap();
        assert_eq!(clock_label(&now), "07:05");
    }
}
