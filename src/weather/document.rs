// src/weather/document.rs
//! Guarded read-only view over a JMA forecast document.
//!
//! The document is an array of report sections, each with `timeSeries` blocks,
//! each with `areas` entries whose sample arrays (`weatherCodes`, `temps`, `pops`, ...)
//! may be absent, empty or sparse. Every step here returns `Option` so callers can
//! degrade one field at a time.

use serde_json::Value;

pub const WEATHER_CODES: &str = "weatherCodes";
pub const WEATHERS: &str = "weathers";
pub const WINDS: &str = "winds";
pub const WAVES: &str = "waves";
pub const POPS: &str = "pops";
pub const TEMPS: &str = "temps";
pub const TEMPS_MAX: &str = "tempsMax";
pub const TEMPS_MIN: &str = "tempsMin";

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDocument(Value);

impl ForecastDocument {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s).map(Self)
    }

    pub fn section(&self, index: usize) -> Option<Section<'_>> {
        self.0
            .as_array()?
            .get(index)
            .filter(|v| v.is_object())
            .map(Section)
    }

    pub fn publishing_office(&self) -> Option<&str> {
        self.section(0)?.0.get("publishingOffice")?.as_str()
    }

    pub fn report_datetime(&self) -> Option<&str> {
        self.section(0)?.0.get("reportDatetime")?.as_str()
    }
}

/// One report section (short-term or weekly).
#[derive(Debug, Clone, Copy)]
pub struct Section<'a>(&'a Value);

impl<'a> Section<'a> {
    fn blocks(&self) -> &'a [Value] {
        self.0
            .get("timeSeries")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn block_count(&self) -> usize {
        self.blocks().len()
    }

    pub fn block(&self, index: usize) -> Option<Block<'a>> {
        self.blocks()
            .get(index)
            .filter(|v| v.is_object())
            .map(Block)
    }
}

/// One time-series block: shared `timeDefines` plus per-area samples.
#[derive(Debug, Clone, Copy)]
pub struct Block<'a>(&'a Value);

impl<'a> Block<'a> {
    pub fn time_defines(&self) -> Vec<&'a str> {
        self.0
            .get("timeDefines")
            .and_then(Value::as_array)
            .map(|a| a.iter().map(|v| v.as_str().unwrap_or_default()).collect())
            .unwrap_or_default()
    }

    pub fn area(&self, index: usize) -> Option<Area<'a>> {
        self.0
            .get("areas")?
            .as_array()?
            .get(index)
            .filter(|v| v.is_object())
            .map(Area)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Area<'a>(&'a Value);

impl<'a> Area<'a> {
    pub fn name(&self) -> Option<&'a str> {
        self.0.get("area")?.get("name")?.as_str()
    }

    /// Raw sample array for `field`, `None` if absent or not an array.
    pub fn series(&self, field: &str) -> Option<&'a [Value]> {
        self.0.get(field)?.as_array().map(Vec::as_slice)
    }

    /// Sample `index` of `field` as trimmed text; blank strings count as absent.
    pub fn sample(&self, field: &str, index: usize) -> Option<String> {
        sample_text(self.series(field)?.get(index)?)
    }
}

fn sample_text(v: &Value) -> Option<String> {
    let s = match v {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}
