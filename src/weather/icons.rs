// src/weather/icons.rs
//! Three-digit JMA weather code → display glyph.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Glyph for every code missing from the table.
pub const FALLBACK_ICON: &str = "🌈";

const SUNNY: &str = "☀️";
const SUN_CLOUD: &str = "🌤️";
const PARTLY: &str = "⛅";
const MOSTLY_CLOUDY: &str = "🌥️";
const CLOUDY: &str = "☁️";
const RAIN: &str = "🌧️";
const STORM: &str = "⛈️";
const SNOW: &str = "❄️";

const WEATHER_ICONS: &[(&str, &str)] = &[
    ("100", SUNNY),
    ("101", SUN_CLOUD),
    ("102", PARTLY),
    ("103", MOSTLY_CLOUDY),
    ("104", CLOUDY),
    ("110", SUN_CLOUD),
    ("111", SUN_CLOUD),
    ("112", SUN_CLOUD),
    ("113", SUN_CLOUD),
    ("114", SUN_CLOUD),
    ("115", SUN_CLOUD),
    ("116", SUN_CLOUD),
    ("117", SUN_CLOUD),
    ("118", SUN_CLOUD),
    ("119", SUN_CLOUD),
    ("120", SUN_CLOUD),
    ("121", SUN_CLOUD),
    ("122", PARTLY),
    ("123", MOSTLY_CLOUDY),
    ("124", MOSTLY_CLOUDY),
    ("125", MOSTLY_CLOUDY),
    ("126", MOSTLY_CLOUDY),
    ("127", MOSTLY_CLOUDY),
    ("128", CLOUDY),
    ("130", RAIN),
    ("131", RAIN),
    ("132", RAIN),
    ("140", RAIN),
    ("200", CLOUDY),
    ("201", CLOUDY),
    ("202", CLOUDY),
    ("203", CLOUDY),
    ("204", CLOUDY),
    ("206", CLOUDY),
    ("207", CLOUDY),
    ("208", CLOUDY),
    ("209", CLOUDY),
    ("210", CLOUDY),
    ("211", CLOUDY),
    ("212", CLOUDY),
    ("213", CLOUDY),
    ("214", CLOUDY),
    ("215", CLOUDY),
    ("216", CLOUDY),
    ("217", CLOUDY),
    ("218", CLOUDY),
    ("219", CLOUDY),
    ("220", CLOUDY),
    ("221", CLOUDY),
    ("222", CLOUDY),
    ("223", CLOUDY),
    ("224", CLOUDY),
    ("225", CLOUDY),
    ("226", CLOUDY),
    ("228", CLOUDY),
    ("229", CLOUDY),
    ("230", CLOUDY),
    ("231", CLOUDY),
    ("240", RAIN),
    ("250", RAIN),
    ("260", RAIN),
    ("270", SNOW),
    ("281", SNOW),
    ("300", RAIN),
    ("301", RAIN),
    ("302", RAIN),
    ("303", RAIN),
    ("304", RAIN),
    ("306", STORM),
    ("308", STORM),
    ("309", RAIN),
    ("311", RAIN),
    ("313", RAIN),
    ("314", RAIN),
    ("315", RAIN),
    ("316", RAIN),
    ("317", RAIN),
    ("320", RAIN),
    ("321", RAIN),
    ("322", RAIN),
    ("323", RAIN),
    ("324", RAIN),
    ("325", RAIN),
    ("326", RAIN),
    ("327", RAIN),
    ("328", RAIN),
    ("329", RAIN),
    ("340", SNOW),
    ("350", SNOW),
    ("361", SNOW),
    ("371", SNOW),
    ("400", SNOW),
    ("401", SNOW),
    ("402", SNOW),
    ("403", SNOW),
    ("405", SNOW),
    ("406", SNOW),
    ("407", SNOW),
    ("409", SNOW),
    ("411", SNOW),
    ("413", SNOW),
    ("414", SNOW),
    ("420", SNOW),
    ("421", SNOW),
    ("422", SNOW),
    ("423", SNOW),
    ("425", SNOW),
    ("426", SNOW),
    ("427", SNOW),
    ("430", SNOW),
    ("450", SNOW),
];

static ICONS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| WEATHER_ICONS.iter().copied().collect());

/// Glyph for `code`, [`FALLBACK_ICON`] for anything unmapped.
pub fn icon_for(code: &str) -> &'static str {
    ICONS.get(code.trim()).copied().unwrap_or(FALLBACK_ICON)
}

pub fn is_mapped(code: &str) -> bool {
    ICONS.contains_key(code.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map() {
        assert_eq!(icon_for("100"), SUNNY);
        assert_eq!(icon_for("306"), STORM);
        assert_eq!(icon_for(" 450 "), SNOW);
    }

    #[test]
    fn unknown_codes_fall_back() {
        for code in ["", "999", "105", "abc", "1000"] {
            assert_eq!(icon_for(code), FALLBACK_ICON, "code {code:?}");
            assert!(!is_mapped(code));
        }
    }
}
