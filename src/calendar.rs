//! # Calendar
//! Month grid for the mini calendar plus the "today" header summary.
//!
//! The grid is Sunday-first, 7 columns wide, padded with spillover days from the
//! neighbouring months so every row is complete.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use serde::Serialize;

use crate::datemath::{self, DayClass};
use crate::error::CalendarError;

pub const COLUMNS: usize = 7;

/// Which month a grid cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthPosition {
    Previous,
    Current,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub day: u32,
    pub position: MonthPosition,
    pub is_today: bool,
    pub class: DayClass,
}

impl CalendarCell {
    pub fn is_other_month(&self) -> bool {
        self.position != MonthPosition::Current
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarGrid {
    pub year: i32,
    pub month: u32,
    /// Every row holds exactly [`COLUMNS`] cells.
    pub rows: Vec<Vec<CalendarCell>>,
}

impl CalendarGrid {
    pub fn cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.rows.iter().flatten()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

/// Build the grid for `year`/`month` (1-based), flagging `today` if it falls inside.
pub fn build(year: i32, month: u32, today: NaiveDate) -> Result<CalendarGrid, CalendarError> {
    let invalid = CalendarError::InvalidMonth { year, month };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(invalid.clone())?;
    let last_day = datemath::days_in_month(year, month).ok_or(invalid.clone())?;
    let (prev_year, prev_month) = datemath::previous_month(year, month);
    let prev_last_day = datemath::days_in_month(prev_year, prev_month).ok_or(invalid)?;

    let leading = datemath::weekday_index(first);
    let today_in_grid = today.year() == year && today.month() == month;

    let mut cells: Vec<CalendarCell> = Vec::with_capacity(6 * COLUMNS);

    for offset in 0..leading {
        cells.push(CalendarCell {
            day: prev_last_day - leading + 1 + offset,
            position: MonthPosition::Previous,
            is_today: false,
            class: DayClass::from_column(cells.len()),
        });
    }

    for day in 1..=last_day {
        cells.push(CalendarCell {
            day,
            position: MonthPosition::Current,
            is_today: today_in_grid && today.day() == day,
            class: DayClass::from_column(cells.len()),
        });
    }

    let mut next_day = 1;
    while cells.len() % COLUMNS != 0 {
        cells.push(CalendarCell {
            day: next_day,
            position: MonthPosition::Next,
            is_today: false,
            class: DayClass::from_column(cells.len()),
        });
        next_day += 1;
    }

    let rows = cells.chunks(COLUMNS).map(<[CalendarCell]>::to_vec).collect();
    Ok(CalendarGrid { year, month, rows })
}

/// Header block: big date number, weekday names and clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodaySummary {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub weekday: &'static str,
    pub weekday_short: &'static str,
    pub class: DayClass,
    pub clock: String,
}

pub fn today_summary<Tz: TimeZone>(now: &DateTime<Tz>) -> TodaySummary {
    let wd = now.weekday();
    TodaySummary {
        year: now.year(),
        month: now.month(),
        day: now.day(),
        weekday: datemath::weekday_name(wd),
        weekday_short: datemath::weekday_short(wd),
        class: DayClass::from_weekday(wd),
        clock: datemath::clock_label(now),
    }
}

/// Grid for the month containing `now`.
pub fn current_month<Tz: TimeZone>(now: &DateTime<Tz>) -> Result<CalendarGrid, CalendarError> {
    let today = now.date_naive();
    build(today.year(), today.month(), today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn month_starting_on_sunday_has_no_leading_cells() {
        // 2023-10-01 is a Sunday
        let g = build(2023, 10, d(2023, 10, 2)).unwrap();
        let first = g.rows[0][0];
        assert_eq!(first.day, 1);
        assert_eq!(first.position, MonthPosition::Current);
        assert_eq!(first.class, DayClass::Sunday);
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert_eq!(
            build(2024, 0, d(2024, 1, 1)),
            Err(CalendarError::InvalidMonth {
                year: 2024,
                month: 0
            })
        );
    }

    #[test]
    fn summary_reports_weekday_and_clock() {
        let now = Utc.with_ymd_and_hms(2024, 1, 13, 9, 30, 0).unwrap();
        let s = today_summary(&now);
        assert_eq!(s.weekday, "Saturday");
        assert_eq!(s.class, DayClass::Saturday);
        assert_eq!(s.clock, "09:30");
        assert_eq!((s.year, s.month, s.day), (2024, 1, 13));
    }
}
