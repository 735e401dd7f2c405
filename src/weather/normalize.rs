// src/weather/normalize.rs
//! Flattens a [`ForecastDocument`] into the display model.
//!
//! Section 0 is the short-term report (block 0: codes/text/wind/wave, block 1:
//! precipitation probability, block 2: temperatures when published). Section 1 is
//! the weekly outlook (block 0: dates + codes, block 1: daily highs/lows).

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::document::{
    Area, ForecastDocument, Section, POPS, TEMPS, TEMPS_MAX, TEMPS_MIN, WAVES, WEATHERS,
    WEATHER_CODES, WINDS,
};
use super::icons::icon_for;
use crate::datemath::{self, DayClass};
use crate::error::ForecastError;

/// Shown wherever a value is not available.
pub const PLACEHOLDER: &str = "--";
pub const PRECIPITATION_WINDOWS: [&str; 4] = ["0-6", "6-12", "12-18", "18-24"];
pub const MAX_DAILY_ENTRIES: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrecipitationSample {
    /// 6-hour window label, empty past the fourth sample.
    pub window: &'static str,
    pub probability: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyForecastEntry {
    pub date: Option<NaiveDate>,
    pub day: Option<u32>,
    /// `M/D`, or the placeholder when the published date is unreadable.
    pub date_label: String,
    pub weekday: &'static str,
    pub class: DayClass,
    pub icon: &'static str,
    pub high: String,
    pub low: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedForecast {
    pub icon: &'static str,
    pub weather_code: String,
    pub description: String,
    pub current_temp: String,
    pub high_temp: String,
    pub low_temp: String,
    pub precipitation: Vec<PrecipitationSample>,
    pub wind: String,
    pub wave: String,
    pub daily: Vec<DailyForecastEntry>,
}

impl NormalizedForecast {
    /// Headline probability: the first sample, or the placeholder.
    pub fn precipitation_headline(&self) -> &str {
        self.precipitation
            .first()
            .map(|p| p.probability.as_str())
            .unwrap_or(PLACEHOLDER)
    }

    pub fn has_high_low(&self) -> bool {
        self.high_temp != PLACEHOLDER || self.low_temp != PLACEHOLDER
    }
}

fn or_placeholder(v: Option<String>) -> String {
    v.unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Normalize a forecast document.
///
/// Only the current weather code and text are required; every other field degrades
/// to a placeholder on its own.
pub fn normalize(doc: &ForecastDocument) -> Result<NormalizedForecast, ForecastError> {
    let short_term = doc
        .section(0)
        .ok_or(ForecastError::UnparseableDocument("short-term report"))?;
    let current = short_term
        .block(0)
        .and_then(|b| b.area(0))
        .ok_or(ForecastError::UnparseableDocument("current conditions"))?;
    let weather_code = current
        .sample(WEATHER_CODES, 0)
        .ok_or(ForecastError::UnparseableDocument(WEATHER_CODES))?;
    let weather_text = current
        .sample(WEATHERS, 0)
        .ok_or(ForecastError::UnparseableDocument(WEATHERS))?;

    // Descriptions carry qualifiers after an ideographic space.
    let description = weather_text
        .split('\u{3000}')
        .next()
        .unwrap_or_default()
        .to_string();

    let weekly = doc.section(1);
    let weekly_temps = weekly.and_then(|s| s.block(1)).and_then(|b| b.area(0));

    Ok(NormalizedForecast {
        icon: icon_for(&weather_code),
        weather_code,
        description,
        current_temp: current_temperature(&short_term),
        high_temp: or_placeholder(weekly_temps.and_then(|a| a.sample(TEMPS_MAX, 0))),
        low_temp: or_placeholder(weekly_temps.and_then(|a| a.sample(TEMPS_MIN, 0))),
        precipitation: precipitation(&short_term),
        wind: current.sample(WINDS, 0).unwrap_or_default(),
        wave: current.sample(WAVES, 0).unwrap_or_default(),
        daily: weekly.map(|s| daily_entries(&s)).unwrap_or_default(),
    })
}

/// Temperatures are only published in some report editions (third block).
fn current_temperature(section: &Section<'_>) -> String {
    if section.block_count() < 3 {
        return PLACEHOLDER.to_string();
    }
    let area = section.block(2).and_then(|b| b.area(0));
    or_placeholder(area.and_then(|a| a.sample(TEMPS, 0).or_else(|| a.sample(TEMPS, 1))))
}

fn precipitation(section: &Section<'_>) -> Vec<PrecipitationSample> {
    let Some(area) = section.block(1).and_then(|b| b.area(0)) else {
        return Vec::new();
    };
    let count = area.series(POPS).map_or(0, <[_]>::len);
    (0..count)
        .map(|i| PrecipitationSample {
            window: PRECIPITATION_WINDOWS.get(i).copied().unwrap_or_default(),
            probability: or_placeholder(area.sample(POPS, i)),
        })
        .collect()
}

/// Daily outlook, zipped by position and capped at [`MAX_DAILY_ENTRIES`].
pub fn daily_entries(weekly: &Section<'_>) -> Vec<DailyForecastEntry> {
    let Some(outlook) = weekly.block(0) else {
        return Vec::new();
    };
    let dates = outlook.time_defines();
    let codes: Option<Area<'_>> = outlook.area(0);
    let temps: Option<Area<'_>> = weekly.block(1).and_then(|b| b.area(0));

    dates
        .iter()
        .take(MAX_DAILY_ENTRIES)
        .enumerate()
        .map(|(i, raw_date)| {
            let date = datemath::date_of_timestamp(raw_date);
            let weekday = date.map(|d| d.weekday());
            let code = codes.and_then(|a| a.sample(WEATHER_CODES, i));
            DailyForecastEntry {
                date,
                day: date.map(|d| d.day()),
                date_label: date.map_or_else(
                    || PLACEHOLDER.to_string(),
                    |d| format!("{}/{}", d.month(), d.day()),
                ),
                weekday: weekday.map_or(PLACEHOLDER, datemath::weekday_short),
                class: weekday.map_or(DayClass::Ordinary, DayClass::from_weekday),
                icon: icon_for(code.as_deref().unwrap_or_default()),
                high: or_placeholder(temps.and_then(|a| a.sample(TEMPS_MAX, i))),
                low: or_placeholder(temps.and_then(|a| a.sample(TEMPS_MIN, i))),
            }
        })
        .collect()
}
