// tests/calendar_grid.rs
//
// Month grid layout: leading/trailing spillover, today flag, weekday classes.

use chrono::NaiveDate;

use info_display::calendar::{build, MonthPosition, COLUMNS};
use info_display::datemath::DayClass;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn days(grid: &info_display::calendar::CalendarGrid, pos: MonthPosition) -> Vec<u32> {
    grid.cells()
        .filter(|c| c.position == pos)
        .map(|c| c.day)
        .collect()
}

#[test]
fn january_2024_with_today_on_the_15th() {
    let g = build(2024, 1, d(2024, 1, 15)).unwrap();

    // 2024-01-01 is a Monday: one spillover day from December.
    assert_eq!(days(&g, MonthPosition::Previous), vec![31]);
    assert_eq!(g.rows[0][0].class, DayClass::Sunday);
    assert_eq!(
        (g.rows[0][1].day, g.rows[0][1].position),
        (1, MonthPosition::Current)
    );
    assert_eq!(days(&g, MonthPosition::Current), (1..=31).collect::<Vec<_>>());
    assert_eq!(days(&g, MonthPosition::Next), vec![1, 2, 3]);
    assert_eq!(g.rows.len(), 5);
    assert!(g.rows.iter().all(|r| r.len() == COLUMNS));

    let today: Vec<_> = g.cells().filter(|c| c.is_today).collect();
    assert_eq!(today.len(), 1);
    assert_eq!(today[0].day, 15);
    assert_eq!(g.rows[2][1], *today[0], "15th sits on Monday of the third row");
    assert_eq!(today[0].class, DayClass::Ordinary);
}

#[test]
fn leap_february_spills_both_ways() {
    let g = build(2024, 2, d(2024, 3, 1)).unwrap();
    assert_eq!(days(&g, MonthPosition::Previous), vec![28, 29, 30, 31]);
    assert_eq!(days(&g, MonthPosition::Current).len(), 29);
    assert_eq!(days(&g, MonthPosition::Next), vec![1, 2]);
    assert!(g.cells().all(|c| !c.is_today), "today is outside the grid month");
}

#[test]
fn february_starting_on_sunday_fills_exactly_four_rows() {
    // 2026-02-01 is a Sunday and the month has 28 days.
    let g = build(2026, 2, d(2026, 2, 10)).unwrap();
    assert_eq!(g.rows.len(), 4);
    assert_eq!(g.cell_count(), 28);
    assert!(g.cells().all(|c| !c.is_other_month()));
}

#[test]
fn august_2024_has_leading_only() {
    let g = build(2024, 8, d(2024, 8, 1)).unwrap();
    assert_eq!(days(&g, MonthPosition::Previous), vec![28, 29, 30, 31]);
    assert!(days(&g, MonthPosition::Next).is_empty());
    assert_eq!(g.cell_count(), 35);
    assert!(g.rows[0][4].is_today);
}

#[test]
fn december_spills_into_next_year() {
    let g = build(2024, 12, d(2024, 12, 31)).unwrap();
    assert!(days(&g, MonthPosition::Previous).is_empty());
    assert_eq!(days(&g, MonthPosition::Next), vec![1, 2, 3, 4]);
    let last_row = g.rows.last().unwrap();
    assert_eq!(last_row[2].day, 31);
    assert!(last_row[2].is_today);
}

#[test]
fn six_row_month_and_column_classes() {
    // 2025-03-01 is a Saturday.
    let g = build(2025, 3, d(2025, 3, 1)).unwrap();
    assert_eq!(g.rows.len(), 6);
    assert_eq!(days(&g, MonthPosition::Previous), vec![23, 24, 25, 26, 27, 28]);

    for row in &g.rows {
        assert_eq!(row[0].class, DayClass::Sunday);
        assert_eq!(row[6].class, DayClass::Saturday);
        assert!(row[1..6].iter().all(|c| c.class == DayClass::Ordinary));
    }
}

#[test]
fn invalid_month_is_an_error() {
    assert!(build(2024, 13, d(2024, 1, 1)).is_err());
}
